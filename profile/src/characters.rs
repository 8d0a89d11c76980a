//! Static character data: the names the API reports in character usage, their
//! internal ids and display colors.

const STOCK_ICON_URL: &str = "https://slippi.gg/images/characters/stock-icon-";

/// A playable character as the ranked API names it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Character {
    pub name: &'static str,
    pub id: u16,
    pub color: Option<&'static str>,
}

const fn character(name: &'static str, id: u16, color: &'static str) -> Character {
    Character {
        name,
        id,
        color: Some(color),
    }
}

/// Every character the API reports, plus the `"None"` placeholder.
pub static CHARACTERS: [Character; 27] = [
    character("CAPTAIN_FALCON", 0, "#c51620"),
    character("DONKEY_KONG", 1, "#2f1003"),
    character("FOX", 2, "#ffb242"),
    character("GAME_AND_WATCH", 3, "#000000"),
    character("KIRBY", 4, "#ffbed8"),
    character("BOWSER", 5, "#376218"),
    character("LINK", 6, "#073f07"),
    character("LUIGI", 7, "#10b91a"),
    character("MARIO", 8, "#ff1d1c"),
    character("MARTH", 9, "#2f3955"),
    character("MEWTWO", 10, "#734c60"),
    character("NESS", 11, "#f9ca58"),
    character("PEACH", 12, "#ff5488"),
    character("PIKACHU", 13, "#ffff00"),
    character("ICE_CLIMBERS", 14, "#8a63ff"),
    character("JIGGLYPUFF", 15, "#ffd6f0"),
    character("SAMUS", 16, "#da490c"),
    character("YOSHI", 17, "#008000"),
    character("ZELDA", 18, "#ff6ac8"),
    character("SHEIK", 19, "#828681"),
    character("FALCO", 20, "#494fd6"),
    character("YOUNG_LINK", 21, "#009e01"),
    character("DR_MARIO", 22, "#d1cfc9"),
    character("ROY", 23, "#962000"),
    character("PICHU", 24, "#ffff1b"),
    character("GANONDORF", 25, "#91763e"),
    Character {
        name: "None",
        id: 256,
        color: None,
    },
];

/// Looks up a character by API name.
pub fn by_name(name: &str) -> Option<&'static Character> {
    CHARACTERS.iter().find(|character| character.name == name)
}

pub fn character_id(name: &str) -> Option<u16> {
    by_name(name).map(|character| character.id)
}

pub fn character_name(id: u16) -> Option<&'static str> {
    CHARACTERS.iter().find(|character| character.id == id).map(|character| character.name)
}

pub fn character_color(name: &str) -> Option<&'static str> {
    by_name(name).and_then(|character| character.color)
}

/// URL of the character's default stock icon on slippi.gg.
pub fn stock_icon_url(name: &str) -> Option<String> {
    character_id(name).map(|id| format!("{STOCK_ICON_URL}{id}-0.png"))
}

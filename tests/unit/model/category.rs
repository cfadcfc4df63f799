use super::*;

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("NPC".parse::<Category>().unwrap(), Category::Npc);
    assert_eq!(" location ".parse::<Category>().unwrap(), Category::Location);
    assert!("dragon".parse::<Category>().is_err());
}

#[test]
fn unknown_names_fall_back_to_defaults() {
    assert_eq!(Category::from_name_lossy("dragon"), Category::Npc);
    assert_eq!(TextureStyle::from_name_lossy("plastic"), TextureStyle::Leather);
    assert_eq!(TextureStyle::from_name_lossy("Stone"), TextureStyle::Stone);
}

#[test]
fn every_category_has_distinct_accent_and_icon() {
    let styles: Vec<_> = Category::ALL.iter().map(|c| c.style()).collect();
    for (i, a) in styles.iter().enumerate() {
        assert!(!a.icon.is_empty());
        for b in &styles[i + 1..] {
            assert_ne!(a.accent, b.accent);
            assert_ne!(a.icon, b.icon);
        }
    }
}

#[test]
fn default_textures_follow_category() {
    assert_eq!(Category::Npc.style().default_texture, TextureStyle::Leather);
    assert_eq!(
        Category::Location.style().default_texture,
        TextureStyle::Parchment
    );
    assert_eq!(Category::Mystery.style().default_texture, TextureStyle::Shadow);
}

#[test]
fn serde_uses_lowercase_names_and_is_lossy() {
    assert_eq!(
        serde_json::to_string(&Category::Faction).unwrap(),
        "\"faction\""
    );
    let c: Category = serde_json::from_str("\"Quest\"").unwrap();
    assert_eq!(c, Category::Quest);
    let c: Category = serde_json::from_str("\"unknown-thing\"").unwrap();
    assert_eq!(c, Category::Npc);
}

//! Topical domain codes.
//!
//! The topical data lives in the uppercase domain codes (ANI, BIR, WIN, ...)
//! tagged from entry definitions at ingestion time. Codes outside this table
//! exist in the `topic` table but carry too few entries to be worth a page,
//! so the topics index only shows codes listed here.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Display metadata for a topical domain code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicMeta {
    pub display: &'static str,
    pub description: &'static str,
}

static TOPIC_CODES: Lazy<HashMap<&'static str, TopicMeta>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut add = |code, display, description| {
        m.insert(code, TopicMeta { display, description });
    };

    add("ANI", "Animals", "Animal names and related terms");
    add("BAN", "Bananas", "Banana varieties and cultivation");
    add("BIR", "Birds", "Bird species and related terms");
    add("BOD", "Body, Illness", "Body parts, illness, and medicine");
    add("BSK", "Basketball", "Basketball terminology");
    add("BUI", "Building", "Building and construction");
    add("CAN", "Canoes, Watercraft", "Canoe parts and watercraft terminology");
    add("CLO", "Clothing", "Clothing and adornment");
    add("CMP", "Computer", "Modern computer terminology");
    add("CN", "Coconuts", "Coconut plant and uses");
    add("COL", "Colors", "Color terms");
    add("CRA", "Crabs", "Crabs and crustaceans");
    add("ECO", "Economics", "Economic and trade terms");
    add("EDU", "Education", "Education and learning");
    add("FER", "Ferns", "Fern species");
    add("FIS", "Fish, Sea Life", "Fish, shellfish, and marine life");
    add("FLO", "Flowers", "Flowers and flowering plants");
    add("FOO", "Food", "Food, cooking, and eating");
    add("G", "Gazetteer", "Place names of Hawaiʻi");
    add("GEO", "Geography", "Geographic terms");
    add("GOV", "Government", "Government and politics");
    add("HOU", "House", "House and dwelling terms");
    add("HUL", "Hula", "Hula dance terminology");
    add("IDI", "Idioms", "Idiomatic expressions");
    add("ILL", "Illness, Medicine", "Illness, disease, and medical terms");
    add("INS", "Insects", "Insects and small creatures");
    add("KAV", "Kava", "Kava plant and ceremony");
    add("LAND", "Land", "Land divisions and geography");
    add("LAW", "Law", "Legal and governance terms");
    add("LEI", "Lei", "Lei making and materials");
    add("LNG", "Language", "Language and linguistic terms");
    add("LUA", "Lua (Fighting)", "Lua martial art terminology");
    add("MTH", "Mathematics", "Mathematical and numerical terms");
    add("MUS", "Music", "Musical instruments and terms");
    add("NET", "Nets", "Net fishing terminology");
    add("PAN", "Pandanus", "Pandanus plant and weaving");
    add("PLA", "Plants", "Plant species and cultivation");
    add("POI", "Poi", "Poi preparation and related terms");
    add("SCI", "Science", "Scientific terminology");
    add("SEA", "Seaweed", "Seaweed and limu species");
    add("SPO", "Sports", "Sports and games");
    add("STA", "Stars, Sky", "Stars, sky, and celestial bodies");
    add("STO", "Stones", "Stones, rocks, and minerals");
    add("SUG", "Sugar Cane", "Sugar cane varieties");
    add("SWD", "Swords, Weapons", "Weapons and warfare implements");
    add("SWP", "Sweet Potatoes", "Sweet potato varieties and cultivation");
    add("TAP", "Tapa", "Tapa cloth making");
    add("TAR", "Taro", "Taro varieties and cultivation");
    add("TII", "Ti Plant", "Ti plant and uses");
    add("TOO", "Tools", "Tools and implements");
    add("TRE", "Trees", "Tree species");
    add("VOL", "Volcanoes", "Volcanic and geological terms");
    add("WAR", "War", "Warfare and military terms");
    add("WIN", "Wind, Rain, Clouds", "Wind names, rain, weather, and clouds");

    // Tagged categories without a topical page in the print sources
    add("AltSpel", "Alternative Spellings", "Entries with variant spellings");
    add("CAR", "Carpentry", "Carpentry and woodworking");
    add("VLB", "Basic Vocabulary", "Core vocabulary words");
    add("SKY", "Sky", "Sky and atmospheric terms");
    add("SOC", "Social", "Social and kinship terms");
    add("PRF", "Prefixes", "Prefix forms and compounds");

    m
});

/// Whether the code should be shown on the topics index.
pub fn is_displayable(code: &str) -> bool {
    TOPIC_CODES.contains_key(code)
}

/// Display metadata for a code, if it is displayable.
pub fn meta(code: &str) -> Option<TopicMeta> {
    TOPIC_CODES.get(code).copied()
}

/// Display name for a code, falling back to the code itself.
pub fn display_name(code: &str) -> &str {
    TOPIC_CODES.get(code).map(|m| m.display).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert!(is_displayable("WIN"));
        assert_eq!(display_name("WIN"), "Wind, Rain, Clouds");
        assert_eq!(meta("G").unwrap().display, "Gazetteer");
    }

    #[test]
    fn unknown_codes_fall_through() {
        assert!(!is_displayable("wind"));
        assert_eq!(display_name("XYZ"), "XYZ");
        assert!(meta("XYZ").is_none());
    }
}

//! Given-name nickname table used by guest search.
//!
//! Each entry lists names interchangeable with its key. Lookups go one level
//! in both directions (declared aliases plus keys that declare the name), so
//! a nickname only reaches its whole family when it has its own entry.

use std::collections::BTreeSet;

static ALIASES: &[(&str, &[&str])] = &[
    ("abigail", &["abby", "abbie", "gail"]),
    ("alexander", &["alex", "al", "xander", "sandy"]),
    ("alexandra", &["alex", "alexa", "sandra", "sandy", "lexi"]),
    ("andrew", &["andy", "drew"]),
    ("anthony", &["tony", "ant"]),
    ("barbara", &["barb", "barbie", "babs"]),
    ("benjamin", &["ben", "benny", "benji"]),
    ("bob", &["robert", "rob", "bobby", "robbie"]),
    ("catherine", &["cathy", "cat", "kate", "katie", "kitty"]),
    ("charles", &["charlie", "chuck", "chas", "chaz"]),
    ("charlotte", &["charlie", "lottie", "lotte"]),
    ("christina", &["chris", "tina", "christy", "chrissy"]),
    ("christopher", &["chris", "kit", "topher"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave", "davey"]),
    ("deborah", &["deb", "debbie", "debby"]),
    ("dorothy", &["dot", "dottie", "dolly"]),
    ("edward", &["ed", "eddie", "ted", "teddy", "ned"]),
    ("elizabeth", &["liz", "lizzie", "beth", "betty", "eliza", "libby", "betsy"]),
    ("emily", &["em", "emmy", "millie"]),
    ("frances", &["fran", "frannie", "frankie"]),
    ("francis", &["frank", "frankie", "fran"]),
    ("frederick", &["fred", "freddie", "freddy"]),
    ("gregory", &["greg"]),
    ("henry", &["hank", "harry", "hal"]),
    ("jacob", &["jake", "jay"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("jennifer", &["jen", "jenny", "jenn"]),
    ("jim", &["james", "jimmy", "jamie"]),
    ("johnathan", &["john", "johnny", "jon", "nathan"]),
    ("jonathan", &["jon", "jonny", "john", "nathan"]),
    ("joseph", &["joe", "joey", "jo"]),
    ("joshua", &["josh"]),
    ("katherine", &["kathy", "kate", "katie", "kat", "kit", "kitty"]),
    ("kathleen", &["kathy", "kath", "katie"]),
    ("kimberly", &["kim", "kimmy"]),
    ("lawrence", &["larry", "laurie"]),
    ("leonard", &["leo", "len", "lenny"]),
    ("liz", &["elizabeth", "lizzie"]),
    ("margaret", &["maggie", "meg", "peggy", "marge", "margie", "greta"]),
    ("matthew", &["matt", "matty"]),
    ("michael", &["mike", "mikey", "mick", "mickey"]),
    ("nicholas", &["nick", "nicky", "nico"]),
    ("patricia", &["pat", "patty", "trish", "tricia"]),
    ("patrick", &["pat", "paddy", "rick"]),
    ("peter", &["pete"]),
    ("rebecca", &["becky", "becca", "beck"]),
    ("richard", &["rick", "ricky", "rich", "dick"]),
    ("robert", &["rob", "bob", "bobby", "robbie", "bert"]),
    ("ronald", &["ron", "ronnie"]),
    ("samantha", &["sam", "sammy"]),
    ("samuel", &["sam", "sammy"]),
    ("stephanie", &["steph", "stevie"]),
    ("stephen", &["steve", "stevie"]),
    ("steven", &["steve", "stevie"]),
    ("susan", &["sue", "susie", "suzy"]),
    ("theodore", &["theo", "ted", "teddy"]),
    ("thomas", &["tom", "tommy"]),
    ("timothy", &["tim", "timmy"]),
    ("victoria", &["vicky", "vickie", "tori"]),
    ("william", &["will", "bill", "billy", "willie", "liam"]),
    ("zachary", &["zach", "zack"]),
];

/// The name itself, its declared aliases, and every key that lists it as an
/// alias. Lowercased; empty input gives an empty set.
pub fn alias_set(name: &str) -> BTreeSet<String> {
    let name = name.trim().to_lowercase();
    let mut set = BTreeSet::new();
    if name.is_empty() {
        return set;
    }

    for (key, aliases) in ALIASES {
        if *key == name {
            set.extend(aliases.iter().map(|a| a.to_string()));
        } else if aliases.contains(&name.as_str()) {
            set.insert(key.to_string());
        }
    }
    set.insert(name);
    set
}

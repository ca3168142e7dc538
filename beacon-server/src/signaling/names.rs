use beacon_core::{PeerId, PeerName};
use std::sync::LazyLock;
use tracing::error;
use uaparser::{Parser as _, UserAgentParser};

/// Produces the presentation descriptor shown to other peers.
pub trait NameResolver: Send + Sync + 'static {
    fn resolve(&self, peer_id: &PeerId, user_agent: Option<&str>) -> PeerName;
}

/// Default resolver: device details parsed from the User-Agent and a
/// two-word display name that stays stable for a given identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentNames;

static UA_PARSER: LazyLock<Option<UserAgentParser>> = LazyLock::new(|| {
    UserAgentParser::from_bytes(include_bytes!("../../ua-regexes.yaml"))
        .inspect_err(|e| error!("Failed to load User-Agent patterns: {e:?}"))
        .ok()
});

const UNKNOWN: &str = "Other";

const COLORS: &[&str] = &[
    "Almond", "Amaranth", "Amber", "Amethyst", "Apricot", "Aqua", "Aquamarine", "Ash", "Auburn",
    "Azure", "Beige", "Bisque", "Black", "Blond", "Blue", "Blush", "Bronze", "Brown", "Buff",
    "Burgundy", "Cadet", "Camel", "Canary", "Caramel", "Cardinal", "Carmine", "Celadon",
    "Cerise", "Cerulean", "Champagne", "Charcoal", "Chartreuse", "Cherry", "Chestnut",
    "Chocolate", "Cinnabar", "Cinnamon", "Citrine", "Claret", "Cobalt", "Cocoa", "Copper",
    "Coral", "Cordovan", "Cornflower", "Cream", "Crimson", "Cyan", "Denim", "Ebony", "Ecru",
    "Eggplant", "Emerald", "Fawn", "Fern", "Flax", "Fuchsia", "Garnet", "Ginger", "Gold",
    "Goldenrod", "Granite", "Grape", "Gray", "Green", "Harlequin", "Hazel", "Heliotrope",
    "Honey", "Indigo", "Iris", "Ivory", "Jade", "Jasmine", "Jet", "Khaki", "Lapis", "Lavender",
    "Lemon", "Lilac", "Lime", "Linen", "Magenta", "Mahogany", "Maize", "Malachite", "Mango",
    "Maroon", "Mauve", "Melon", "Mint", "Moss", "Mulberry", "Mustard", "Navy", "Ochre", "Olive",
    "Onyx", "Orange", "Orchid", "Peach", "Pear", "Pearl", "Periwinkle", "Persimmon", "Pewter",
    "Pine", "Pink", "Pistachio", "Platinum", "Plum", "Pumpkin", "Purple", "Quartz", "Raspberry",
    "Red", "Rose", "Ruby", "Russet", "Rust", "Saffron", "Sage", "Salmon", "Sand", "Sangria",
    "Sapphire", "Scarlet", "Seafoam", "Sepia", "Shamrock", "Sienna", "Silver", "Slate",
    "Smoke", "Snow", "Steel", "Straw", "Sunset", "Tan", "Tangerine", "Taupe", "Teal", "Thistle",
    "Tomato", "Topaz", "Turquoise", "Ultramarine", "Umber", "Vanilla", "Verdigris",
    "Vermilion", "Violet", "Viridian", "Walnut", "Wheat", "White", "Wine", "Wisteria", "Yellow",
];

const ANIMALS: &[&str] = &[
    "Aardvark", "Albatross", "Alligator", "Alpaca", "Anaconda", "Angelfish", "Ant", "Anteater",
    "Antelope", "Armadillo", "Axolotl", "Baboon", "Badger", "Barracuda", "Bat", "Bear",
    "Beaver", "Bee", "Beetle", "Bison", "Boar", "Bobcat", "Buffalo", "Butterfly", "Camel",
    "Capybara", "Caracal", "Cardinal", "Caribou", "Cassowary", "Cat", "Chameleon", "Cheetah",
    "Chickadee", "Chimpanzee", "Chinchilla", "Chipmunk", "Cobra", "Cockatoo", "Condor",
    "Cormorant", "Cougar", "Coyote", "Crab", "Crane", "Cricket", "Crocodile", "Crow", "Cuckoo",
    "Deer", "Dingo", "Dolphin", "Donkey", "Dormouse", "Dove", "Dragonfly", "Duck", "Eagle",
    "Echidna", "Eel", "Egret", "Elephant", "Elk", "Emu", "Falcon", "Ferret", "Finch",
    "Firefly", "Flamingo", "Fox", "Frog", "Gazelle", "Gecko", "Gerbil", "Gibbon", "Giraffe",
    "Gnu", "Goat", "Goldfinch", "Goose", "Gopher", "Gorilla", "Grasshopper", "Grouse",
    "Gull", "Hamster", "Hare", "Hawk", "Hedgehog", "Heron", "Hippo", "Hornet", "Horse",
    "Hummingbird", "Hyena", "Ibex", "Ibis", "Iguana", "Impala", "Jackal", "Jaguar", "Jay",
    "Jellyfish", "Kangaroo", "Kestrel", "Kingfisher", "Kiwi", "Koala", "Kookaburra", "Krill",
    "Ladybug", "Lemming", "Lemur", "Leopard", "Lion", "Lizard", "Llama", "Lobster", "Lynx",
    "Macaw", "Magpie", "Mallard", "Manatee", "Mandrill", "Marlin", "Marmot", "Meerkat", "Mink",
    "Mole", "Mongoose", "Moose", "Moth", "Mouse", "Narwhal", "Newt", "Nightingale", "Ocelot",
    "Octopus", "Okapi", "Opossum", "Orca", "Oriole", "Osprey", "Ostrich", "Otter", "Owl", "Ox",
    "Oyster", "Panda", "Panther", "Parrot", "Partridge", "Peacock", "Pelican", "Penguin",
    "Pheasant", "Pigeon", "Platypus", "Porcupine", "Possum", "Puffin", "Puma", "Python",
    "Quail", "Quokka", "Rabbit", "Raccoon", "Ram", "Raven", "Reindeer", "Rhino", "Robin",
    "Salamander", "Salmon", "Sandpiper", "Scorpion", "Seahorse", "Seal", "Shark", "Sheep",
    "Shrew", "Skunk", "Sloth", "Snail", "Sparrow", "Spider", "Squid", "Squirrel", "Starling",
    "Stingray", "Stork", "Swallow", "Swan", "Swift", "Tapir", "Tarsier", "Tern", "Tiger",
    "Toad", "Toucan", "Trout", "Turkey", "Turtle", "Viper", "Vulture", "Wallaby", "Walrus",
    "Warbler", "Wasp", "Weasel", "Whale", "Wildcat", "Wolf", "Wolverine", "Wombat",
    "Woodpecker", "Wren", "Yak", "Zebra",
];

impl NameResolver for UserAgentNames {
    fn resolve(&self, peer_id: &PeerId, user_agent: Option<&str>) -> PeerName {
        let mut name = user_agent
            .zip(UA_PARSER.as_ref())
            .map(|(ua, parser)| parse_device(parser, ua))
            .unwrap_or_default();

        let mut device_name = name
            .os
            .as_deref()
            .map(|os| format!("{} ", os.replace("Mac OS", "Mac")))
            .unwrap_or_default();
        if let Some(detail) = name.model.as_deref().or(name.browser.as_deref()) {
            device_name.push_str(detail);
        }
        let device_name = device_name.trim_end();

        name.device_name = if device_name.is_empty() {
            "Unknown Device".to_owned()
        } else {
            device_name.to_owned()
        };
        name.display_name = display_name(peer_id);
        name
    }
}

fn known(family: &str) -> Option<String> {
    (!family.is_empty() && family != UNKNOWN).then(|| family.to_owned())
}

fn parse_device(parser: &UserAgentParser, ua: &str) -> PeerName {
    let client = parser.parse(ua);
    let device_family = client.device.family.to_string();
    let os = known(&client.os.family);

    PeerName {
        model: client
            .device
            .model
            .map(|model| model.to_string())
            .filter(|model| !model.is_empty()),
        browser: known(&client.user_agent.family),
        device_type: device_type(ua, &device_family, os.as_deref()).map(str::to_owned),
        os,
        ..PeerName::default()
    }
}

fn device_type(ua: &str, device_family: &str, os: Option<&str>) -> Option<&'static str> {
    match (device_family, os) {
        ("iPad" | "Kindle", _) => Some("tablet"),
        ("iPhone" | "iPod", _) => Some("mobile"),
        (_, Some("Android")) if ua.contains("Mobile") => Some("mobile"),
        (_, Some("Android")) => Some("tablet"),
        _ if ua.contains("Mobile") => Some("mobile"),
        _ => None,
    }
}

/// "Colour Animal", seeded by the identity so reconnects keep their name.
fn display_name(peer_id: &PeerId) -> String {
    let seed = string_hash(peer_id.as_str()).unsigned_abs() as usize;
    let color = COLORS[seed % COLORS.len()];
    let animal = ANIMALS[(seed / COLORS.len()) % ANIMALS.len()];
    format!("{color} {animal}")
}

/// 31-multiplier hash over UTF-16 code units, wrapping at 32 bits.
fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

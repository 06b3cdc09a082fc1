//! Built-in chapter-one content.
//!
//! The shipped PhantomThrill story: a down-on-their-luck thief works the
//! city, meets Cal at the clinic, takes the museum job, scouts the Jade
//! Whip, and runs the three-phase heist. `init` exports this seed to JSON
//! so operators can author their own chapters from a working example.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::engine::state::{GameState, HeistProgress, PlayerInfo, TimeOfDay};
use crate::engine::{
    DIALOGUE_ACCEPT_HEIST, DIALOGUE_CLINIC_MEET_CAL, DIALOGUE_INSPECTOR_MEET, DIALOGUE_INTRO,
    DIALOGUE_MUSEUM_SCOUT, DIALOGUE_UNDERGROUND_FIRST, FLAG_ACCEPTED_HEIST, FLAG_FOUND_UNDERGROUND,
    HEIST_MUSEUM,
};
use crate::story::loader::{resolve, RawLocation, RawStory};
use crate::story::types::{
    ActionRecord, Credits, DialogueLine, Effect, EffectList, EndingRecord, FirstVisit,
    HeistOption, HeistScene, HeistSequence, MetaRecord, StatAdjust, StoryData,
};

/// The resolved built-in story.
pub fn builtin_story() -> StoryData {
    resolve(builtin_raw())
}

/// The built-in story in authoring form, exportable as JSON.
pub fn builtin_raw() -> RawStory {
    RawStory {
        meta: meta(),
        initial_state: initial_state(),
        dialogues: dialogues(),
        locations: locations(),
        actions: actions(),
        heist_sequences: heists(),
        endings: endings(),
    }
}

fn meta() -> MetaRecord {
    MetaRecord {
        title: "PhantomThrill".into(),
        subtitle: "A Text-Based Phantom Thief Adventure".into(),
        credits: Credits {
            game_designer: "K. Arai".into(),
            prompter: "M. Voss".into(),
            software_engineer: "J. Okafor".into(),
        },
    }
}

fn initial_state() -> GameState {
    let stats: BTreeMap<String, i64> = [
        ("money", 150),
        ("hunger", 80),
        ("health", 90),
        ("hygiene", 70),
        ("charisma", 20),
        ("fitness", 20),
        ("knowledge", 20),
        ("criminality", 10),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    GameState {
        player: PlayerInfo {
            name: "Alex".into(),
            thief_name: "Thrill".into(),
        },
        stats,
        flags: BTreeSet::new(),
        inventory: Vec::new(),
        heist: HeistProgress::default(),
        day: 1,
        time_of_day: TimeOfDay::Morning,
        current_location: None,
    }
}

fn effects(list: Vec<Effect>) -> EffectList {
    EffectList(list)
}

fn stat(stat: &str, delta: i64) -> Effect {
    Effect::StatDelta {
        stat: stat.into(),
        delta,
    }
}

fn dialogues() -> HashMap<String, Vec<DialogueLine>> {
    let mut map = HashMap::new();

    map.insert(
        DIALOGUE_INTRO.to_string(),
        vec![
            DialogueLine::new(
                "Narrator",
                "Rain hammers the motel's neon sign. Your last landlord kept the deposit, \
your last job kept your dignity, and the city kept everything else.",
            ),
            DialogueLine::new(
                "Narrator",
                "But {player_name} is not done. Somewhere out there is a score big enough \
to matter, and a name the papers will learn: {thief_name}.",
            ),
            DialogueLine::new("Motel Clerk", "Room 4. Pay by Friday or the door code changes.")
                .with_choice(
                    "Flash a winning smile. \"Friday it is.\"",
                    effects(vec![stat("charisma", 2)]),
                )
                .with_choice(
                    "Note the cheap lock on the cash drawer.",
                    effects(vec![stat("knowledge", 2)]),
                ),
            DialogueLine::new(
                "Narrator",
                "The room smells of bleach and old cigarettes. It will do. Every legend \
starts somewhere small.",
            ),
        ],
    );

    map.insert(
        DIALOGUE_CLINIC_MEET_CAL.to_string(),
        vec![
            DialogueLine::new(
                "Narrator",
                "The free clinic's waiting room is half-empty. A wiry man with a courier \
bag takes the chair next to yours, uninvited.",
            ),
            DialogueLine::new(
                "Cal",
                "You've got the look. Not sick, just broke. I know people who pay for \
steady hands, {player_name}.",
            ),
            DialogueLine::new(
                "Cal",
                "Underground market, behind the pawn shop shutters. Tell them Cal sent you.",
            ),
        ],
    );

    map.insert(
        DIALOGUE_UNDERGROUND_FIRST.to_string(),
        vec![
            DialogueLine::new(
                "Narrator",
                "Lantern light, folding tables, and merchandise nobody invoices. A dealer \
with a jeweler's loupe waves you over.",
            ),
            DialogueLine::new(
                "Dealer",
                "Cal's referral, huh. Here's the pitch: the City Museum is showing the \
Jade Whip. One week only. I need a thief, not a tourist.",
            )
            .with_choice(
                "\"I'm in. Tell me everything.\"",
                effects(vec![
                    Effect::SetFlag(FLAG_ACCEPTED_HEIST.into()),
                    stat("criminality", 5),
                ]),
            )
            .with_choice(
                "\"I don't steal for strangers.\"",
                effects(vec![stat("charisma", 1)]),
            ),
        ],
    );

    map.insert(
        DIALOGUE_ACCEPT_HEIST.to_string(),
        vec![
            DialogueLine::new(
                "Dealer",
                "Smart. The fence pays five grand on delivery. Scout the museum first; \
going in blind is how thieves become inmates.",
            ),
            DialogueLine::new(
                "Narrator",
                "The dealer slides a burner phone and a disguise kit across the table. \
No receipt, obviously.",
            ),
        ],
    );

    map.insert(
        DIALOGUE_MUSEUM_SCOUT.to_string(),
        vec![
            DialogueLine::new(
                "Narrator",
                "You drift through the galleries with the other visitors, counting \
cameras between polite nods at the art.",
            ),
            DialogueLine::new(
                "Narrator",
                "There it is: the Jade Whip, coiled on black velvet in the East Wing. \
Two guards, one camera loop, one skylight. You memorize all of it.",
            ),
        ],
    );

    map.insert(
        DIALOGUE_INSPECTOR_MEET.to_string(),
        vec![
            DialogueLine::new(
                "Narrator",
                "A woman in a gray coat stops beside you at the railing, watching the \
same display case you are.",
            ),
            DialogueLine::new(
                "Inspector Mori",
                "Beautiful piece. Thieves think so too; that's why I'm here. Inspector \
Mori. And you are?",
            )
            .with_choice(
                "Give a fake name and admire the art.",
                effects(vec![stat("charisma", 1), Effect::AddSuspicion(1)]),
            )
            .with_choice(
                "\"Just a student of history.\"",
                effects(vec![Effect::AddSuspicion(2)]),
            ),
            DialogueLine::new(
                "Inspector Mori",
                "Enjoy the exhibit. I never forget a face.",
            ),
        ],
    );

    map.insert(
        "motel_return".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "The clerk doesn't look up. Home, for a given value of home.",
        )],
    );

    map.insert(
        "grocery_visit".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "Fluorescent aisles and discount stickers. The security mirror is angled \
wrong; you notice these things now.",
        )],
    );

    map.insert(
        "restaurant_visit".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "The diner's booths are cracked vinyl, but the smell of fried onions is \
honest work's best advertisement.",
        )],
    );

    map.insert(
        "gym_visit".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "Chalk dust and clanging plates. Nobody asks why you want to climb a rope \
in under ten seconds.",
        )],
    );

    map.insert(
        "bar_visit".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "The Rusty Anchor pours cheap and hears everything. Half the city's secrets \
are two drinks deep.",
        )],
    );

    map.insert(
        "police_visit".to_string(),
        vec![DialogueLine::new(
            "Narrator",
            "You walk past the precinct steps like a citizen with nothing to hide. \
Practice makes perfect.",
        )],
    );

    map
}

fn locations() -> Vec<RawLocation> {
    fn loc(id: &str, name: &str, icon: &str, description: &str, actions: &[&str]) -> RawLocation {
        RawLocation {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            description: description.into(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            locked: false,
            unlock_flag: None,
            first_visit: None,
        }
    }

    fn side(mut raw: RawLocation, flag: &str, dialogue: &str) -> RawLocation {
        raw.first_visit = Some(FirstVisit {
            flag: flag.into(),
            dialogue: dialogue.into(),
        });
        raw
    }

    let mut underground = loc(
        "underground",
        "Underground Market",
        "🕳️",
        "Folding tables, fenced goods, and the dealer who knows your name now.",
        &["Talk to dealer"],
    );
    underground.locked = true;
    underground.unlock_flag = Some(FLAG_FOUND_UNDERGROUND.into());

    vec![
        side(
            loc(
                "motel",
                "Roadside Motel",
                "🏚️",
                "Room 4: a bed, a shower, and a door code you technically still have.",
                &["Sleep", "Take a shower"],
            ),
            "visited_motel",
            "motel_return",
        ),
        loc(
            "clinic",
            "Free Clinic",
            "🏥",
            "Walk-ins welcome. The coffee machine is broken; the gossip is not.",
            &["Get a checkup", "Talk to receptionist"],
        ),
        side(
            loc(
                "grocery",
                "Corner Grocery",
                "🛒",
                "Everything a body needs, most of it near its sell-by date.",
                &["Buy groceries", "Browse the shelves"],
            ),
            "visited_grocery",
            "grocery_visit",
        ),
        side(
            loc(
                "restaurant",
                "Starlight Diner",
                "🍽️",
                "Open all night. The waitress calls everyone 'hon'.",
                &["Eat at the diner"],
            ),
            "visited_restaurant",
            "restaurant_visit",
        ),
        side(
            loc(
                "gym",
                "Ironworks Gym",
                "🏋️",
                "Day passes are cheap. Calluses are free.",
                &["Work out"],
            ),
            "visited_gym",
            "gym_visit",
        ),
        side(
            loc(
                "bar",
                "The Rusty Anchor",
                "🍺",
                "Dim lights, loose tongues, and a bartender who waters nothing down.",
                &["Order a drink", "Chat with regulars"],
            ),
            "visited_bar",
            "bar_visit",
        ),
        side(
            loc(
                "police",
                "Precinct Plaza",
                "🚓",
                "The bulletin board outside the station is public reading.",
                &["Check wanted posters"],
            ),
            "visited_police",
            "police_visit",
        ),
        loc(
            "museum",
            "City Museum",
            "🏛️",
            "Marble halls, priceless cases, and a visiting exhibit worth a career.",
            &["Case the exhibits"],
        ),
        underground,
    ]
}

fn actions() -> HashMap<String, ActionRecord> {
    fn action(
        cost: i64,
        effects: &[(&str, StatAdjust)],
        message: &str,
        advance_time: bool,
    ) -> ActionRecord {
        ActionRecord {
            cost,
            effects: effects
                .iter()
                .map(|(stat, adjust)| (stat.to_string(), *adjust))
                .collect(),
            add_intel: None,
            advance_time,
            message: message.into(),
            message_after_heist: None,
        }
    }

    let mut map = HashMap::new();
    map.insert(
        "Sleep".to_string(),
        action(
            0,
            &[("health", StatAdjust::Delta(10))],
            "You sleep like someone with no outstanding warrants. Yet.",
            true,
        ),
    );
    map.insert(
        "Take a shower".to_string(),
        action(
            0,
            &[("hygiene", StatAdjust::Full)],
            "Hot water, thin towel. You feel human again.",
            false,
        ),
    );
    map.insert(
        "Get a checkup".to_string(),
        action(
            25,
            &[("health", StatAdjust::Full)],
            "The doctor pronounces you 'surprisingly fine' and bills you anyway.",
            false,
        ),
    );
    map.insert(
        "Buy groceries".to_string(),
        action(
            15,
            &[("hunger", StatAdjust::Delta(30))],
            "Instant noodles, day-old bread, and one apologetic apple.",
            false,
        ),
    );
    map.insert(
        "Browse the shelves".to_string(),
        action(
            0,
            &[],
            "You memorize the aisle layout out of habit. Old habits, new uses.",
            false,
        ),
    );
    map.insert(
        "Eat at the diner".to_string(),
        action(
            20,
            &[("hunger", StatAdjust::Full)],
            "The hash browns alone are worth going straight for. Almost.",
            false,
        ),
    );
    map.insert(
        "Work out".to_string(),
        action(
            10,
            &[
                ("fitness", StatAdjust::Delta(5)),
                ("hunger", StatAdjust::Delta(-10)),
            ],
            "Rope climbs and wall pulls. A very specific training montage.",
            true,
        ),
    );
    map.insert(
        "Order a drink".to_string(),
        action(
            10,
            &[("charisma", StatAdjust::Delta(3))],
            "You trade toasts with a dockworker who laughs at all your jokes.",
            false,
        ),
    );

    let mut regulars = action(
        0,
        &[("charisma", StatAdjust::Delta(2))],
        "An old watchman grumbles about museum shifts to anyone who'll listen.",
        false,
    );
    regulars.add_intel = Some("A guard at the museum naps during the Night shift".into());
    map.insert("Chat with regulars".to_string(), regulars);

    let mut casing = action(
        0,
        &[("knowledge", StatAdjust::Delta(2))],
        "You linger by the East Wing, timing the sweeps behind a museum map.",
        false,
    );
    casing.add_intel = Some("East Wing cameras sweep in 40-second loops".into());
    map.insert("Case the exhibits".to_string(), casing);

    let mut posters = action(
        0,
        &[],
        "The board shows petty crooks and parking scofflaws. Nothing about you... yet.",
        false,
    );
    posters.message_after_heist = Some(
        "A fresh poster shows a masked figure: the phantom who took the Jade Whip. \
The sketch looks nothing like you. You keep walking."
            .into(),
    );
    map.insert("Check wanted posters".to_string(), posters);

    map
}

fn heists() -> HashMap<String, HeistSequence> {
    fn option(text: &str, stat: &str, req: i64) -> HeistOption {
        HeistOption {
            text: text.into(),
            stat: stat.into(),
            req,
        }
    }

    fn scene(icon: &str, description: &str, options: Vec<HeistOption>) -> HeistScene {
        HeistScene {
            icon: icon.into(),
            description: description.into(),
            options,
        }
    }

    let museum = HeistSequence {
        infiltration: vec![
            scene(
                "🌃",
                "Midnight. The museum's service wall rises ahead; the night guard \
paces the staff entrance.",
                vec![
                    option("Scale the service wall", "fitness", 30),
                    option("Charm the night guard with a lost-tourist act", "charisma", 30),
                    option("Pick the staff entrance lock", "knowledge", 30),
                ],
            ),
            scene(
                "📹",
                "Inside. The East Wing cameras sweep their loops between you and the \
Jade Whip.",
                vec![
                    option("Time the 40-second loop and walk through", "knowledge", 25),
                    option("Dash between the blind spots", "fitness", 25),
                ],
            ),
        ],
        calling_card: vec![scene(
            "🃏",
            "The case is open, the Whip is yours. A phantom leaves a signature.",
            vec![
                option("Leave your calling card with a flourish", "criminality", 20),
                option("Forge a curator's transfer note instead", "knowledge", 30),
            ],
        )],
        escape: vec![scene(
            "🚨",
            "An alarm relay trips somewhere below. Time to not exist.",
            vec![
                option("Melt into the late-night crowd outside", "charisma", 25),
                option("Sprint the rooftop line you scouted", "fitness", 35),
            ],
        )],
    };

    let mut map = HashMap::new();
    map.insert(HEIST_MUSEUM.to_string(), museum);
    map
}

fn endings() -> HashMap<String, EndingRecord> {
    let mut map = HashMap::new();
    map.insert(
        "caught".to_string(),
        EndingRecord {
            title: "Caught Red-Handed".into(),
            text: "A hand lands on your shoulder. Inspector Mori doesn't gloat; she \
just looks disappointed. The Jade Whip stays. You don't."
                .into(),
        },
    );
    map.insert(
        "chapter1_complete".to_string(),
        EndingRecord {
            title: "The Phantom's Debut".into(),
            text: "By sunrise the city has a new legend and the fence has your \
merchandise. The papers print your calling card on page one. \
{thief_name} is real now."
                .into(),
        },
    );
    map.insert(
        "starvation".to_string(),
        EndingRecord {
            title: "Hunger's Toll".into(),
            text: "Ambition doesn't feed anyone. You fade out of the story before it \
ever gets good."
                .into(),
        },
    );
    map.insert(
        "health".to_string(),
        EndingRecord {
            title: "Body Gives Out".into(),
            text: "The city wins the slow way. The phantom retires before the debut."
                .into(),
        },
    );
    map
}

//! The narrative state engine.
//!
//! Everything here operates on an explicitly passed `Session`: immutable
//! story tables, one mutable `GameState`, a `Presenter` for the blocking
//! player-facing calls, and a `SaveStore` for snapshots. There are no
//! process-wide singletons, so independent sessions can coexist in one
//! process (and in tests).

pub mod actions;
pub mod clock;
pub mod dialogue;
pub mod effects;
pub mod ending;
pub mod errors;
pub mod heist;
pub mod location;
pub mod session;
pub mod state;

pub use errors::EngineError;
pub use session::{EngineOptions, Session};
pub use state::{GameState, TimeOfDay};

/// Control-flow signal threaded through the interpreter. Endings do not
/// short-circuit via errors or process exit; they surface here and unwind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going where you are.
    Continue,
    /// Exit the current location loop back to the main menu.
    Leave,
    /// A terminal ending fired; the session is over.
    SessionOver,
}

// Story flags the hard-coded narrative beats pivot on.
pub const FLAG_MET_CAL: &str = "met_cal";
pub const FLAG_FOUND_UNDERGROUND: &str = "found_underground";
pub const FLAG_ACCEPTED_HEIST: &str = "accepted_heist";
pub const FLAG_GOT_JADE_WHIP_INFO: &str = "got_jade_whip_info";
pub const FLAG_MET_INSPECTOR: &str = "met_inspector";
pub const FLAG_COMPLETED_HEIST: &str = "completed_museum_heist";

// Dialogue keys those beats play.
pub const DIALOGUE_INTRO: &str = "intro";
pub const DIALOGUE_CLINIC_MEET_CAL: &str = "clinic_meet_cal";
pub const DIALOGUE_UNDERGROUND_FIRST: &str = "underground_first";
pub const DIALOGUE_ACCEPT_HEIST: &str = "accept_heist";
pub const DIALOGUE_MUSEUM_SCOUT: &str = "museum_scout";
pub const DIALOGUE_INSPECTOR_MEET: &str = "inspector_meet";

/// The chapter-one heist sequence id.
pub const HEIST_MUSEUM: &str = "museum";

pub const ITEM_BURNER_PHONE: &str = "Burner Phone";
pub const ITEM_DISGUISE_KIT: &str = "Disguise Kit";
pub const INTEL_JADE_WHIP: &str = "Jade Whip location: East Wing";

/// Contextual menu entry injected at the underground once preparations hold.
pub const MENU_BEGIN_HEIST: &str = "*** BEGIN MUSEUM HEIST ***";

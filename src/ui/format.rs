//! Pure text formatting for the status header and the inventory/intel views.

use crate::engine::state::GameState;

pub const DIVIDER: &str =
    "============================================================";

/// The stats header shown above every menu.
pub fn format_status(state: &GameState) -> String {
    format!(
        "{div}\nDay {day} - {time}\nMoney: ${money} | Hunger: {hunger}% | Health: {health}%\n\
Charisma: {charisma} | Fitness: {fitness} | Knowledge: {knowledge} | Criminality: {criminality}\n{div}",
        div = DIVIDER,
        day = state.day,
        time = state.time_of_day.label(),
        money = state.stat("money"),
        hunger = state.stat("hunger"),
        health = state.stat("health"),
        charisma = state.stat("charisma"),
        fitness = state.stat("fitness"),
        knowledge = state.stat("knowledge"),
        criminality = state.stat("criminality"),
    )
}

pub fn format_inventory(state: &GameState) -> String {
    let mut out = String::from("=== INVENTORY ===");
    if state.inventory.is_empty() {
        out.push_str("\nNo items yet.");
    } else {
        for item in &state.inventory {
            out.push_str("\n  - ");
            out.push_str(item);
        }
    }
    out
}

pub fn format_intel(state: &GameState) -> String {
    let mut out = String::from("=== INTEL NOTES ===");
    if state.heist.intel.is_empty() {
        out.push_str("\nNo intel yet. Scout locations!");
    } else {
        for note in &state.heist.intel {
            out.push_str("\n  - ");
            out.push_str(note);
        }
    }
    out
}

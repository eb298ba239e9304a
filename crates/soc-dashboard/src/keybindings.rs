use egui::{Context, Key, Modifiers};
use soc_widgets::{ScenarioId, SCENARIOS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TriggerScenario(ScenarioId),
    Refresh,
    ToggleFeeds,
    ToggleDebug,
}

const SCENARIO_KEYS: [Key; 6] = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5, Key::Num6];

/// Maps one unmodified key press to a command.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.any() {
        return None;
    }
    if let Some(pos) = SCENARIO_KEYS.iter().position(|k| *k == key) {
        return Some(Command::TriggerScenario(SCENARIOS[pos].id));
    }
    match key {
        Key::R | Key::F5 => Some(Command::Refresh),
        Key::P => Some(Command::ToggleFeeds),
        Key::D => Some(Command::ToggleDebug),
        _ => None,
    }
}

pub fn dispatch(ctx: &Context) -> Vec<Command> {
    let mut cmds = Vec::new();
    ctx.input(|i| {
        for ev in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } = ev
            {
                if let Some(cmd) = command_for_key(*key, *modifiers) {
                    cmds.push(cmd);
                }
            }
        }
    });
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_follow_catalog_order() {
        let got: Vec<_> = SCENARIO_KEYS
            .iter()
            .filter_map(|k| command_for_key(*k, Modifiers::NONE))
            .collect();
        let expected: Vec<_> = SCENARIOS
            .iter()
            .map(|s| Command::TriggerScenario(s.id))
            .collect();
        assert_eq!(got, expected);
        assert_eq!(
            command_for_key(Key::Num2, Modifiers::NONE),
            Some(Command::TriggerScenario(ScenarioId::Ddos))
        );
    }

    #[test]
    fn test_modifiers_disable_shortcuts() {
        assert_eq!(command_for_key(Key::R, Modifiers::CTRL), None);
        assert_eq!(command_for_key(Key::Num1, Modifiers::SHIFT), None);
    }

    #[test]
    fn test_panel_shortcuts() {
        assert_eq!(command_for_key(Key::R, Modifiers::NONE), Some(Command::Refresh));
        assert_eq!(command_for_key(Key::F5, Modifiers::NONE), Some(Command::Refresh));
        assert_eq!(command_for_key(Key::P, Modifiers::NONE), Some(Command::ToggleFeeds));
        assert_eq!(command_for_key(Key::D, Modifiers::NONE), Some(Command::ToggleDebug));
        assert_eq!(command_for_key(Key::Q, Modifiers::NONE), None);
    }
}

//! Quit decision table
//!
//! | command        | condition                        | plan              |
//! |----------------|----------------------------------|-------------------|
//! | quit_all       | has_marked                       | TeardownAll       |
//! | write_quit_all | has_marked                       | TeardownAll+write |
//! | quit           | has_marked, one window, one tab  | CloseCurrent      |
//! | write_quit     | has_marked, one window, one tab  | WriteCloseCurrent |
//! | any            | otherwise                        | Native            |

use serde::Serialize;

use mainterm_host::{EditorHost, NativeCommand, QuitCommand};
use mainterm_session::SessionRegistry;

/// The facts about the editor a decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuitContext {
    /// At least one marked session exists
    pub has_marked: bool,
    /// Exactly one window in the current tab
    pub single_window: bool,
    /// Exactly one tab
    pub single_tab: bool,
}

impl QuitContext {
    pub fn capture(host: &dyn EditorHost, registry: &SessionRegistry) -> Self {
        Self {
            has_marked: registry.has_marked(host),
            single_window: host.window_count() == 1,
            single_tab: host.tab_count() == 1,
        }
    }

    /// Closing the current buffer is unambiguous about what it vacates
    pub fn single_layout(&self) -> bool {
        self.single_window && self.single_tab
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum QuitPlan {
    /// Step aside
    Native { command: NativeCommand },
    /// [write ->] delete everything but the session -> collapse layout,
    /// stopping at the first failed step
    TeardownAll { write: bool, force: bool },
    /// Delete everything but the session
    CloseCurrent { force: bool },
    /// write -> delete -> focus session, each step attempted regardless
    WriteCloseCurrent { force: bool },
}

pub fn decide(command: QuitCommand, force: bool, context: &QuitContext) -> QuitPlan {
    if !context.has_marked {
        return QuitPlan::Native {
            command: NativeCommand::new(command, force),
        };
    }

    match command {
        QuitCommand::QuitAll => QuitPlan::TeardownAll {
            write: false,
            force,
        },
        QuitCommand::WriteQuitAll => QuitPlan::TeardownAll { write: true, force },
        QuitCommand::Quit if context.single_layout() => QuitPlan::CloseCurrent { force },
        QuitCommand::WriteQuit if context.single_layout() => {
            QuitPlan::WriteCloseCurrent { force }
        }
        QuitCommand::Quit | QuitCommand::WriteQuit => QuitPlan::Native {
            command: NativeCommand::new(command, force),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_COMMANDS: [QuitCommand; 4] = [
        QuitCommand::Quit,
        QuitCommand::WriteQuit,
        QuitCommand::QuitAll,
        QuitCommand::WriteQuitAll,
    ];

    fn context(has_marked: bool, single_window: bool, single_tab: bool) -> QuitContext {
        QuitContext {
            has_marked,
            single_window,
            single_tab,
        }
    }

    #[test]
    fn test_no_marked_session_is_passthrough() {
        for command in ALL_COMMANDS {
            for force in [false, true] {
                for (w, t) in [(true, true), (false, true), (true, false), (false, false)] {
                    assert_eq!(
                        decide(command, force, &context(false, w, t)),
                        QuitPlan::Native {
                            command: NativeCommand::new(command, force)
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn test_all_variants_ignore_layout() {
        for (w, t) in [(true, true), (false, true), (true, false), (false, false)] {
            assert_eq!(
                decide(QuitCommand::QuitAll, true, &context(true, w, t)),
                QuitPlan::TeardownAll {
                    write: false,
                    force: true
                }
            );
            assert_eq!(
                decide(QuitCommand::WriteQuitAll, false, &context(true, w, t)),
                QuitPlan::TeardownAll {
                    write: true,
                    force: false
                }
            );
        }
    }

    #[test]
    fn test_single_buffer_variants_need_single_layout() {
        assert_eq!(
            decide(QuitCommand::Quit, false, &context(true, true, true)),
            QuitPlan::CloseCurrent { force: false }
        );
        assert_eq!(
            decide(QuitCommand::WriteQuit, true, &context(true, true, true)),
            QuitPlan::WriteCloseCurrent { force: true }
        );

        // Two windows or two tabs: ambiguous, let the editor handle it
        assert_eq!(
            decide(QuitCommand::Quit, false, &context(true, false, true)),
            QuitPlan::Native {
                command: NativeCommand::new(QuitCommand::Quit, false)
            }
        );
        assert_eq!(
            decide(QuitCommand::WriteQuit, true, &context(true, true, false)),
            QuitPlan::Native {
                command: NativeCommand::new(QuitCommand::WriteQuit, true)
            }
        );
    }

    #[test]
    fn test_plan_serializes_with_tag() {
        let plan = decide(QuitCommand::QuitAll, false, &context(true, true, true));
        let json = serde_json::to_value(plan).unwrap();
        assert_eq!(json["plan"], "teardown_all");
        assert_eq!(json["write"], false);
    }
}

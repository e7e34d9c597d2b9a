//! Per-category undo stacks for overlay commands.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::{CommandCategory, Overlay, OverlayCommand, OverlayError};
use crate::network::RouteId;

/// An executed command and whether it changed the overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedCommand {
    pub command: OverlayCommand,
    pub changed: bool,
    pub executed_at: DateTime<Utc>,
}

/// Three independent LIFO stacks, one per [`CommandCategory`].
///
/// Undoing one category never disturbs the others.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    route: Vec<LoggedCommand>,
    route_mode: Vec<LoggedCommand>,
    bicycle_scale: Vec<LoggedCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self, category: CommandCategory) -> &Vec<LoggedCommand> {
        match category {
            CommandCategory::Route => &self.route,
            CommandCategory::RouteMode => &self.route_mode,
            CommandCategory::BicycleScale => &self.bicycle_scale,
        }
    }

    fn stack_mut(&mut self, category: CommandCategory) -> &mut Vec<LoggedCommand> {
        match category {
            CommandCategory::Route => &mut self.route,
            CommandCategory::RouteMode => &mut self.route_mode,
            CommandCategory::BicycleScale => &mut self.bicycle_scale,
        }
    }

    /// Execute a command and push it onto its category's stack.
    ///
    /// A command that fails is not recorded.
    pub fn execute(
        &mut self,
        command: OverlayCommand,
        overlay: &mut Overlay,
    ) -> Result<bool, OverlayError> {
        let changed = command.execute(overlay)?;
        debug!(?command, changed, "executed overlay command");
        self.stack_mut(command.category()).push(LoggedCommand {
            command,
            changed,
            executed_at: Utc::now(),
        });
        Ok(changed)
    }

    /// Reverse the newest command of one category and return it.
    pub fn undo(
        &mut self,
        category: CommandCategory,
        overlay: &mut Overlay,
    ) -> Result<OverlayCommand, OverlayError> {
        let stack = self.stack_mut(category);
        let entry = stack.last().ok_or(OverlayError::NothingToUndo(category))?;
        entry.command.undo(entry.changed, overlay)?;
        let command = entry.command;
        stack.pop();
        debug!(?command, "undid overlay command");
        Ok(command)
    }

    /// The newest command of one category.
    pub fn last(&self, category: CommandCategory) -> Option<&LoggedCommand> {
        self.stack(category).last()
    }

    /// All commands of one category, oldest first.
    pub fn history(&self, category: CommandCategory) -> &[LoggedCommand] {
        self.stack(category)
    }

    pub fn len(&self) -> usize {
        self.route.len() + self.route_mode.len() + self.bicycle_scale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear every disabled route and mode along with both route stacks.
    ///
    /// This cannot be undone. The bicycle scale and its stack are untouched.
    pub fn reset_disabled(&mut self, overlay: &mut Overlay) {
        overlay.clear_disabled();
        let dropped = self.route.len() + self.route_mode.len();
        self.route.clear();
        self.route_mode.clear();
        info!(dropped, "reset disabled routes and modes");
    }

    /// Drop every command and overlay fact naming a route that has been
    /// removed from the map. Route handles may be reused afterwards.
    pub fn forget_route(&mut self, route: RouteId, overlay: &mut Overlay) {
        overlay.forget_route(route);
        self.route
            .retain(|entry| entry.command.route() != Some(route));
        self.route_mode
            .retain(|entry| entry.command.route() != Some(route));
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TransportMode;
    use proptest::prelude::*;

    fn arb_command() -> impl Strategy<Value = OverlayCommand> {
        let route = (0usize..4).prop_map(RouteId::new);
        let mode = proptest::sample::select(TransportMode::ALL.to_vec());
        prop_oneof![
            route.clone().prop_map(|route| OverlayCommand::DisableRoute { route }),
            route.clone().prop_map(|route| OverlayCommand::EnableRoute { route }),
            (route.clone(), mode.clone())
                .prop_map(|(route, mode)| OverlayCommand::DisableMode { route, mode }),
            (route, mode).prop_map(|(route, mode)| OverlayCommand::EnableMode { route, mode }),
        ]
    }

    proptest! {
        /// Undoing every command, newest first, restores the starting overlay.
        #[test]
        fn undo_all_restores_start(commands in proptest::collection::vec(arb_command(), 0..40)) {
            let mut overlay = Overlay::new();
            overlay.disable_route(RouteId::new(2));
            overlay.disable_mode(RouteId::new(3), TransportMode::Boat);
            let start = overlay.clone();

            let mut log = CommandLog::new();
            let mut order = Vec::new();
            for command in commands {
                log.execute(command, &mut overlay).unwrap();
                order.push(command.category());
            }
            for category in order.into_iter().rev() {
                log.undo(category, &mut overlay).unwrap();
            }

            prop_assert_eq!(overlay, start);
            prop_assert!(log.is_empty());
        }
    }
}

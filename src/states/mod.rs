//! The fixed set of application states.
//!
//! Every state is a long-lived value in the [`StateArena`], selected by
//! [`StateId`], so transitions never allocate. Each implements the
//! enter/update/exit lifecycle: `enter` registers the input kinds the state
//! wants and picks an indicator effect, `update` runs once per driver tick,
//! and `exit` must release the input registrations and silence the
//! indicator.

mod adjust;
mod done;
mod duration_select;
mod idle;
mod paused;
mod provision;
mod reset;
mod sleep;
mod startup;
mod task_complete_prompt;
mod task_detail;
mod task_list;
mod task_list_view;
mod timer;

pub use adjust::AdjustState;
pub use done::DoneState;
pub use duration_select::DurationSelectState;
pub use idle::IdleState;
pub use paused::PausedState;
pub use provision::ProvisionState;
pub use reset::ResetState;
pub use sleep::SleepState;
pub use startup::StartupState;
pub use task_complete_prompt::TaskCompletePromptState;
pub use task_detail::TaskDetailState;
pub use task_list::TaskListState;
pub use task_list_view::TaskListViewState;
pub use timer::TimerState;

use crate::context::Ctx;

/// Identifies one state in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Startup,
    Idle,
    Adjust,
    Sleep,
    Reset,
    Provision,
    Timer,
    Paused,
    Done,
    TaskCompletePrompt,
    TaskList,
    TaskListView,
    TaskDetail,
    DurationSelect,
}

/// Lifecycle contract every state implements.
pub trait State {
    /// Idempotent setup: reset local cursors/timers, pick the indicator
    /// effect, register input handlers.
    fn enter(&mut self, ctx: &mut Ctx);

    /// One driver tick: poll input, refresh the display, evaluate timeouts.
    fn update(&mut self, ctx: &mut Ctx);

    /// Mandatory cleanup: release input registrations, silence the
    /// indicator. The engine never does this implicitly.
    fn exit(&mut self, ctx: &mut Ctx);
}

/// Pre-allocated state instances, one per [`StateId`].
pub struct StateArena {
    startup: StartupState,
    idle: IdleState,
    adjust: AdjustState,
    sleep: SleepState,
    reset: ResetState,
    provision: ProvisionState,
    timer: TimerState,
    paused: PausedState,
    done: DoneState,
    prompt: TaskCompletePromptState,
    task_list: TaskListState,
    task_list_view: TaskListViewState,
    task_detail: TaskDetailState,
    duration_select: DurationSelectState,
}

impl StateArena {
    pub fn new() -> Self {
        Self {
            startup: StartupState::new(),
            idle: IdleState::new(),
            adjust: AdjustState::new(),
            sleep: SleepState::new(),
            reset: ResetState::new(),
            provision: ProvisionState::new(),
            timer: TimerState::new(),
            paused: PausedState::new(),
            done: DoneState::new(),
            prompt: TaskCompletePromptState::new(),
            task_list: TaskListState::new(),
            task_list_view: TaskListViewState::new(),
            task_detail: TaskDetailState::new(),
            duration_select: DurationSelectState::new(),
        }
    }

    pub fn get_mut(&mut self, id: StateId) -> &mut dyn State {
        match id {
            StateId::Startup => &mut self.startup,
            StateId::Idle => &mut self.idle,
            StateId::Adjust => &mut self.adjust,
            StateId::Sleep => &mut self.sleep,
            StateId::Reset => &mut self.reset,
            StateId::Provision => &mut self.provision,
            StateId::Timer => &mut self.timer,
            StateId::Paused => &mut self.paused,
            StateId::Done => &mut self.done,
            StateId::TaskCompletePrompt => &mut self.prompt,
            StateId::TaskList => &mut self.task_list,
            StateId::TaskListView => &mut self.task_list_view,
            StateId::TaskDetail => &mut self.task_detail,
            StateId::DurationSelect => &mut self.duration_select,
        }
    }
}

impl Default for StateArena {
    fn default() -> Self {
        Self::new()
    }
}

//! End-of-session prompt: should the task be marked done upstream?
//!
//! Defaults to "mark done" after a natural completion and "leave open" after
//! a cancellation. Rotation toggles, click or long press confirms; exactly
//! one decision event leaves this state.

use crate::config::{GREEN, MAGENTA};
use crate::context::Ctx;
use crate::display::{DisplaySink, Screen};
use crate::domain::{screen_name, PromptContext};
use crate::events::OutboundEvent;
use crate::indicator::{IndicatorEffect, IndicatorSink};
use crate::input::{InputEvent, InputKind};
use crate::states::{State, StateId};
use std::time::Duration;
use tracing::{info, warn};

pub struct TaskCompletePromptState {
    prompt: Option<PromptContext>,
    mark_done_selected: bool,
}

impl TaskCompletePromptState {
    pub fn new() -> Self {
        Self {
            prompt: None,
            mark_done_selected: false,
        }
    }

    fn confirm(&self, ctx: &mut Ctx) {
        if let Some(prompt) = &self.prompt {
            info!(
                mark_done = self.mark_done_selected,
                canceled = prompt.canceled,
                "task decision confirmed"
            );
            ctx.send_event(OutboundEvent::task_done_decision(
                prompt,
                self.mark_done_selected,
            ));
        }
        ctx.request_transition(StateId::Idle);
    }
}

impl State for TaskCompletePromptState {
    fn enter(&mut self, ctx: &mut Ctx) {
        self.prompt = ctx.take_staged_prompt().or_else(|| self.prompt.take());
        let canceled = match &self.prompt {
            Some(prompt) => prompt.canceled,
            None => {
                warn!("prompt entered with no session context");
                ctx.request_transition(StateId::Idle);
                return;
            }
        };
        info!(canceled, "entering task-complete prompt state");

        self.mark_done_selected = !canceled;
        ctx.indicator.set_effect(IndicatorEffect::Breath {
            color: if canceled { MAGENTA } else { GREEN },
            period: Duration::from_secs(2),
        });
        ctx.input.register_all(&[
            InputKind::Click,
            InputKind::LongPress,
            InputKind::Rotate,
        ]);
    }

    fn update(&mut self, ctx: &mut Ctx) {
        for event in ctx.input.drain_registered() {
            match event {
                InputEvent::Rotate(delta) => {
                    if delta > 0 {
                        self.mark_done_selected = true;
                    } else if delta < 0 {
                        self.mark_done_selected = false;
                    }
                }
                InputEvent::Click | InputEvent::LongPress => {
                    self.confirm(ctx);
                }
                InputEvent::DoubleClick => {}
            }
        }
        if ctx.transition_pending() {
            return;
        }

        if let Some(prompt) = &self.prompt {
            ctx.display.show(Screen::TaskCompletePrompt {
                task_name: screen_name(
                    &prompt.task.display_name,
                    &prompt.task.name,
                    &prompt.task.id,
                ),
                mark_done_selected: self.mark_done_selected,
                canceled: prompt.canceled,
            });
        }
    }

    fn exit(&mut self, ctx: &mut Ctx) {
        info!("exiting task-complete prompt state");
        ctx.input.clear_handlers();
        ctx.indicator.off();
    }
}

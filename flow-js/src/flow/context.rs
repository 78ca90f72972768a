//! Stack of enclosing constructs that `break`, `continue`, and `return` can
//! target, each accumulating the flow states that jump to it.

use crate::flow::info::UncondFlow;

/// What kind of construct a frame represents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
  /// A loop, optionally carrying the label of a directly enclosing labeled
  /// statement so `break label` and `continue label` both resolve to it.
  Loop { label: Option<String> },
  /// A switch statement; a target for unlabeled `break` only.
  Switch,
  /// A labeled non-loop statement; a target for `break label` only.
  Label { name: String },
  /// A function body; the target for `return`.
  Method,
}

/// One enclosing construct with the accumulated states of the jumps that
/// target it. Accumulators start at the dead-end bottom so a frame nothing
/// jumped to stays recognizably empty.
#[derive(Clone, Debug)]
pub struct Frame {
  pub kind: FrameKind,
  pub inits_on_break: UncondFlow,
  pub inits_on_continue: UncondFlow,
}

impl Frame {
  fn new(kind: FrameKind) -> Self {
    Frame {
      kind,
      inits_on_break: UncondFlow::dead_end(),
      inits_on_continue: UncondFlow::dead_end(),
    }
  }

  fn matches_label(&self, label: &str) -> bool {
    match &self.kind {
      FrameKind::Loop { label: Some(l) } => l == label,
      FrameKind::Label { name } => name == label,
      _ => false,
    }
  }

  fn takes_unlabeled_break(&self) -> bool {
    matches!(self.kind, FrameKind::Loop { .. } | FrameKind::Switch)
  }

  fn is_loop(&self) -> bool {
    matches!(self.kind, FrameKind::Loop { .. })
  }
}

/// The stack of frames between the current statement and the function entry.
pub struct FlowContextStack {
  frames: Vec<Frame>,
}

impl FlowContextStack {
  pub fn new() -> Self {
    FlowContextStack { frames: Vec::new() }
  }

  pub fn push_loop(&mut self, label: Option<String>) {
    self.frames.push(Frame::new(FrameKind::Loop { label }));
  }

  pub fn push_switch(&mut self) {
    self.frames.push(Frame::new(FrameKind::Switch));
  }

  pub fn push_label(&mut self, name: String) {
    self.frames.push(Frame::new(FrameKind::Label { name }));
  }

  pub fn push_method(&mut self) {
    self.frames.push(Frame::new(FrameKind::Method));
  }

  pub fn pop(&mut self) -> Frame {
    self.frames.pop().unwrap()
  }

  /// Whether `name` is already used by an enclosing labeled statement within
  /// the current function.
  pub fn label_in_use(&self, name: &str) -> bool {
    for frame in self.frames.iter().rev() {
      if frame.kind == FrameKind::Method {
        return false;
      }
      if frame.matches_label(name) {
        return true;
      }
    }
    false
  }

  /// Merge `flow` into the break accumulator of the targeted frame. Returns
  /// false if no frame matches (an undefined label, or a break outside any
  /// breakable construct).
  pub fn record_break(&mut self, label: Option<&str>, flow: &UncondFlow) -> bool {
    for frame in self.frames.iter_mut().rev() {
      if frame.kind == FrameKind::Method {
        return false;
      }
      let hit = match label {
        Some(name) => frame.matches_label(name),
        None => frame.takes_unlabeled_break(),
      };
      if hit {
        frame.inits_on_break = frame.inits_on_break.clone().merged_with(flow);
        return true;
      }
    }
    false
  }

  /// Merge `flow` into the continue accumulator of the targeted loop. Returns
  /// false if no enclosing loop matches.
  pub fn record_continue(&mut self, label: Option<&str>, flow: &UncondFlow) -> bool {
    for frame in self.frames.iter_mut().rev() {
      if frame.kind == FrameKind::Method {
        return false;
      }
      let hit = frame.is_loop()
        && match label {
          Some(name) => frame.matches_label(name),
          None => true,
        };
      if hit {
        frame.inits_on_continue = frame.inits_on_continue.clone().merged_with(flow);
        return true;
      }
    }
    false
  }

  /// Merge `flow` into the innermost method frame's break accumulator, which
  /// doubles as the inits-on-return set.
  pub fn record_return(&mut self, flow: &UncondFlow) -> bool {
    for frame in self.frames.iter_mut().rev() {
      if frame.kind == FrameKind::Method {
        frame.inits_on_break = frame.inits_on_break.clone().merged_with(flow);
        return true;
      }
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assigned(slot: usize) -> UncondFlow {
    let mut flow = UncondFlow::start();
    flow.mark_assigned(slot);
    flow
  }

  #[test]
  fn unlabeled_break_targets_innermost_loop_or_switch() {
    let mut stack = FlowContextStack::new();
    stack.push_method();
    stack.push_loop(None);
    stack.push_switch();
    assert!(stack.record_break(None, &assigned(0)));
    let switch = stack.pop();
    assert!(switch.inits_on_break.is_definitely_assigned(0));
    let lp = stack.pop();
    assert!(lp.inits_on_break.is_dead_end());
  }

  #[test]
  fn labeled_jumps_resolve_through_intervening_frames() {
    let mut stack = FlowContextStack::new();
    stack.push_method();
    stack.push_loop(Some("outer".to_string()));
    stack.push_switch();
    stack.push_loop(None);
    assert!(stack.record_continue(Some("outer"), &assigned(1)));
    assert!(stack.record_break(Some("outer"), &assigned(2)));
    stack.pop();
    stack.pop();
    let outer = stack.pop();
    assert!(outer.inits_on_continue.is_definitely_assigned(1));
    assert!(outer.inits_on_break.is_definitely_assigned(2));
  }

  #[test]
  fn jumps_do_not_cross_function_boundaries() {
    let mut stack = FlowContextStack::new();
    stack.push_loop(Some("outer".to_string()));
    stack.push_method();
    assert!(!stack.record_break(Some("outer"), &assigned(0)));
    assert!(!stack.record_continue(None, &assigned(0)));
    assert!(!stack.label_in_use("outer"));
  }

  #[test]
  fn label_lookup_stops_at_method() {
    let mut stack = FlowContextStack::new();
    stack.push_label("a".to_string());
    stack.push_method();
    assert!(!stack.label_in_use("a"));
    stack.push_label("b".to_string());
    assert!(stack.label_in_use("b"));
  }

  #[test]
  fn break_accumulator_joins_multiple_jumps() {
    let mut stack = FlowContextStack::new();
    stack.push_method();
    stack.push_loop(None);
    let mut both = assigned(0);
    both.mark_assigned(1);
    assert!(stack.record_break(None, &both));
    assert!(stack.record_break(None, &assigned(1)));
    let lp = stack.pop();
    assert!(!lp.inits_on_break.is_definitely_assigned(0));
    assert!(lp.inits_on_break.is_definitely_assigned(1));
    assert!(lp.inits_on_break.is_potentially_assigned(0));
  }
}

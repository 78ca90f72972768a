//! The flow-analysis lattice: per-local assignment bitsets plus a
//! reachability tag, optionally split into when-true/when-false views.
//!
//! All values here have plain value semantics: forking two branches means
//! cloning, so two live branches can never alias one instance. Merges consume
//! or borrow their inputs and produce a fresh value.

use serde::Serialize;

/// Reachability of a program point.
///
/// `DeadEnd` is the distinguished "no path reaches here, even hypothetically"
/// tag used by branch accumulators before any branch has arrived; it is
/// recognized by tag equality.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ReachMode {
  Reachable,
  Unreachable,
  DeadEnd,
}

impl ReachMode {
  pub fn is_reachable(&self) -> bool {
    matches!(self, ReachMode::Reachable)
  }

  pub fn is_unreachable(&self) -> bool {
    !self.is_reachable()
  }
}

/// A growable set of local slot indices.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize)]
pub struct BitSet {
  words: Vec<u64>,
}

impl BitSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, index: usize) {
    let word = index / 64;
    if word >= self.words.len() {
      self.words.resize(word + 1, 0);
    }
    self.words[word] |= 1 << (index % 64);
  }

  pub fn contains(&self, index: usize) -> bool {
    let word = index / 64;
    self
      .words
      .get(word)
      .is_some_and(|w| w & (1 << (index % 64)) != 0)
  }

  pub fn union_with(&mut self, other: &BitSet) {
    if other.words.len() > self.words.len() {
      self.words.resize(other.words.len(), 0);
    }
    for (word, other_word) in self.words.iter_mut().zip(&other.words) {
      *word |= other_word;
    }
  }

  pub fn intersect_with(&mut self, other: &BitSet) {
    for (i, word) in self.words.iter_mut().enumerate() {
      *word &= other.words.get(i).copied().unwrap_or(0);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.words.iter().all(|w| *w == 0)
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self
      .words
      .iter()
      .enumerate()
      .flat_map(|(wi, w)| (0..64).filter(move |bit| w & (1 << bit) != 0).map(move |bit| wi * 64 + bit))
  }
}

/// One unconditional abstract state: reachability plus the definitely- and
/// potentially-assigned slot sets.
///
/// Invariant: `definite ⊆ potential`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct UncondFlow {
  pub reach: ReachMode,
  definite: BitSet,
  potential: BitSet,
}

impl UncondFlow {
  /// The state at function entry: reachable, nothing assigned.
  pub fn start() -> Self {
    Self {
      reach: ReachMode::Reachable,
      definite: BitSet::new(),
      potential: BitSet::new(),
    }
  }

  /// The accumulator starting state: no path has arrived yet.
  pub fn dead_end() -> Self {
    Self {
      reach: ReachMode::DeadEnd,
      definite: BitSet::new(),
      potential: BitSet::new(),
    }
  }

  pub fn is_dead_end(&self) -> bool {
    self.reach == ReachMode::DeadEnd
  }

  pub fn set_reach_mode(&mut self, reach: ReachMode) {
    self.reach = reach;
  }

  pub fn mark_assigned(&mut self, slot: usize) {
    self.definite.insert(slot);
    self.potential.insert(slot);
  }

  pub fn is_definitely_assigned(&self, slot: usize) -> bool {
    self.definite.contains(slot)
  }

  pub fn is_potentially_assigned(&self, slot: usize) -> bool {
    self.potential.contains(slot)
  }

  /// Union in both definite and potential assignments from `other`.
  pub fn add_initializations_from(&mut self, other: &UncondFlow) {
    self.definite.union_with(&other.definite);
    self.potential.union_with(&other.potential);
  }

  /// Union in only the potential assignments from `other`.
  pub fn add_potential_initializations_from(&mut self, other: &UncondFlow) {
    self.potential.union_with(&other.potential);
  }

  /// Least-upper-bound join of two control-flow paths.
  ///
  /// A local stays definitely assigned only if it is definitely assigned on
  /// every reachable merged path; an unreachable side contributes only its
  /// potential assignments. The result is reachable unless both sides are
  /// unreachable; `DeadEnd` survives only if both sides are `DeadEnd`.
  pub fn merged_with(mut self, other: &UncondFlow) -> UncondFlow {
    let reach = match (self.reach.is_unreachable(), other.reach.is_unreachable()) {
      (false, false) => ReachMode::Reachable,
      (true, false) => {
        // Only `other` is live; our definite set must not survive the join.
        self.definite = other.definite.clone();
        ReachMode::Reachable
      }
      (false, true) => ReachMode::Reachable,
      (true, true) => {
        self.definite.intersect_with(&other.definite);
        if self.reach == ReachMode::DeadEnd && other.reach == ReachMode::DeadEnd {
          ReachMode::DeadEnd
        } else {
          ReachMode::Unreachable
        }
      }
    };
    if !self.reach.is_unreachable() && !other.reach.is_unreachable() {
      self.definite.intersect_with(&other.definite);
    }
    self.potential.union_with(&other.potential);
    self.reach = reach;
    self
  }
}

/// Flow state at a program point, either one unconditional state or a pair of
/// states for the true/false outcomes of a boolean-valued expression.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum FlowInfo {
  Uncond(UncondFlow),
  Cond {
    when_true: UncondFlow,
    when_false: UncondFlow,
  },
}

impl From<UncondFlow> for FlowInfo {
  fn from(flow: UncondFlow) -> Self {
    FlowInfo::Uncond(flow)
  }
}

impl FlowInfo {
  pub fn start() -> Self {
    UncondFlow::start().into()
  }

  pub fn dead_end() -> Self {
    UncondFlow::dead_end().into()
  }

  pub fn split(when_true: UncondFlow, when_false: UncondFlow) -> Self {
    FlowInfo::Cond {
      when_true,
      when_false,
    }
  }

  /// Collapses any conditional split: definite assignments that hold on both
  /// outcomes, potentials from either.
  pub fn unconditional_copy(&self) -> UncondFlow {
    match self {
      FlowInfo::Uncond(flow) => flow.clone(),
      FlowInfo::Cond {
        when_true,
        when_false,
      } => when_true.clone().merged_with(when_false),
    }
  }

  /// The state assuming the expression evaluated truthy.
  pub fn inits_when_true(&self) -> UncondFlow {
    match self {
      FlowInfo::Uncond(flow) => flow.clone(),
      FlowInfo::Cond { when_true, .. } => when_true.clone(),
    }
  }

  /// The state assuming the expression evaluated falsy.
  pub fn inits_when_false(&self) -> UncondFlow {
    match self {
      FlowInfo::Uncond(flow) => flow.clone(),
      FlowInfo::Cond { when_false, .. } => when_false.clone(),
    }
  }

  /// Swaps the true/false views; the identity on unconditional flow.
  pub fn negated(self) -> FlowInfo {
    match self {
      FlowInfo::Uncond(flow) => FlowInfo::Uncond(flow),
      FlowInfo::Cond {
        when_true,
        when_false,
      } => FlowInfo::Cond {
        when_true: when_false,
        when_false: when_true,
      },
    }
  }

  pub fn mark_assigned(&mut self, slot: usize) {
    match self {
      FlowInfo::Uncond(flow) => flow.mark_assigned(slot),
      FlowInfo::Cond {
        when_true,
        when_false,
      } => {
        when_true.mark_assigned(slot);
        when_false.mark_assigned(slot);
      }
    }
  }
}

/// Branch join with static-branch elimination.
///
/// `b1_eliminated`/`b2_eliminated` mark a branch as statically known not
/// taken (an optimized-true/false condition); an eliminated branch is skipped
/// entirely rather than joined, trading safety for precision on branches that
/// truly cannot execute. `fake_reachable_after` promotes an unreachable
/// result back to reachable, so code after `if (true) { return; }` is
/// analyzed without a cascade of unreachable-code reports.
pub fn merged_optimized_branches(
  b1: UncondFlow,
  b1_eliminated: bool,
  b2: UncondFlow,
  b2_eliminated: bool,
  fake_reachable_after: bool,
) -> UncondFlow {
  let mut merged = if b1_eliminated && !b2_eliminated {
    b2
  } else if b2_eliminated && !b1_eliminated {
    b1
  } else {
    b1.merged_with(&b2)
  };
  if fake_reachable_after && merged.reach.is_unreachable() {
    merged.set_reach_mode(ReachMode::Reachable);
  }
  merged
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assigned(slots: &[usize]) -> UncondFlow {
    let mut flow = UncondFlow::start();
    for slot in slots {
      flow.mark_assigned(*slot);
    }
    flow
  }

  #[test]
  fn join_is_idempotent_and_commutative() {
    let a = assigned(&[0, 2]);
    let b = assigned(&[2, 5]);

    let aa = merged_optimized_branches(a.clone(), false, a.clone(), false, false);
    assert_eq!(aa, a);

    let ab = a.clone().merged_with(&b);
    let ba = b.clone().merged_with(&a);
    for slot in 0..8 {
      assert_eq!(ab.is_definitely_assigned(slot), ba.is_definitely_assigned(slot));
      assert_eq!(ab.is_potentially_assigned(slot), ba.is_potentially_assigned(slot));
    }
  }

  #[test]
  fn join_keeps_definite_only_on_both_sides() {
    let merged = assigned(&[0, 1]).merged_with(&assigned(&[1, 2]));
    assert!(!merged.is_definitely_assigned(0));
    assert!(merged.is_definitely_assigned(1));
    assert!(!merged.is_definitely_assigned(2));
    assert!(merged.is_potentially_assigned(0));
    assert!(merged.is_potentially_assigned(2));
  }

  #[test]
  fn unreachable_side_contributes_only_potentials() {
    let mut dead = assigned(&[3]);
    dead.set_reach_mode(ReachMode::Unreachable);
    let merged = assigned(&[7]).merged_with(&dead);
    assert!(merged.reach.is_reachable());
    assert!(merged.is_definitely_assigned(7));
    assert!(!merged.is_definitely_assigned(3));
    assert!(merged.is_potentially_assigned(3));
  }

  #[test]
  fn dead_end_survives_only_when_both_sides_are_dead_ends() {
    let both = UncondFlow::dead_end().merged_with(&UncondFlow::dead_end());
    assert_eq!(both.reach, ReachMode::DeadEnd);

    let mut unreachable = UncondFlow::start();
    unreachable.set_reach_mode(ReachMode::Unreachable);
    let mixed = UncondFlow::dead_end().merged_with(&unreachable);
    assert_eq!(mixed.reach, ReachMode::Unreachable);
  }

  #[test]
  fn eliminated_branch_is_skipped_entirely() {
    let live = assigned(&[1]);
    let mut eliminated = assigned(&[9]);
    eliminated.set_reach_mode(ReachMode::Unreachable);
    let merged = merged_optimized_branches(live.clone(), false, eliminated, true, false);
    assert_eq!(merged, live);
  }

  #[test]
  fn fake_reachable_promotes_the_merge() {
    let mut returned = assigned(&[0]);
    returned.set_reach_mode(ReachMode::DeadEnd);
    let mut eliminated = UncondFlow::start();
    eliminated.set_reach_mode(ReachMode::Unreachable);
    let merged = merged_optimized_branches(returned, false, eliminated, true, true);
    assert!(merged.reach.is_reachable());
    assert!(merged.is_definitely_assigned(0));
  }

  #[test]
  fn conditional_split_collapses_by_intersection() {
    let info = FlowInfo::split(assigned(&[0, 1]), assigned(&[1]));
    let collapsed = info.unconditional_copy();
    assert!(!collapsed.is_definitely_assigned(0));
    assert!(collapsed.is_definitely_assigned(1));
    assert!(collapsed.is_potentially_assigned(0));

    let negated = info.negated();
    assert!(negated.inits_when_false().is_definitely_assigned(0));
    assert!(!negated.inits_when_true().is_definitely_assigned(0));
  }
}

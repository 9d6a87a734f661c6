use std::fmt;
use tracing::{debug, info};

use flow_core::model::Level;

use crate::assessment::PlacementService;
use crate::error::LevelSelectionError;

/// Where the level picker currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelectionMode {
    Picking { selected: Option<Level> },
    Testing,
    Closed,
}

/// How the picker was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Confirmed(Level),
    Skipped,
}

type OnConfirm = Box<dyn FnOnce(Level)>;

/// Level picker with a placement-test detour.
///
/// A confirmed level is handed to the callback exactly once, after which the
/// flow is `Closed` and rejects every further step.
pub struct LevelSelectionFlow {
    mode: LevelSelectionMode,
    outcome: Option<LevelOutcome>,
    on_confirm: Option<OnConfirm>,
}

impl LevelSelectionFlow {
    pub fn new(on_confirm: impl FnOnce(Level) + 'static) -> Self {
        Self {
            mode: LevelSelectionMode::Picking { selected: None },
            outcome: None,
            on_confirm: Some(Box::new(on_confirm)),
        }
    }

    #[must_use]
    pub fn mode(&self) -> LevelSelectionMode {
        self.mode
    }

    #[must_use]
    pub fn selected(&self) -> Option<Level> {
        match self.mode {
            LevelSelectionMode::Picking { selected } => selected,
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.mode == LevelSelectionMode::Closed
    }

    /// Highlights `level`; a later pick replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError` unless the flow is picking.
    pub fn select(&mut self, level: Level) -> Result<(), LevelSelectionError> {
        self.ensure_picking()?;
        self.mode = LevelSelectionMode::Picking {
            selected: Some(level),
        };
        Ok(())
    }

    /// Delivers the highlighted level and closes the flow.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError::NothingSelected` when no level is highlighted.
    pub fn confirm(&mut self) -> Result<Level, LevelSelectionError> {
        self.ensure_picking()?;
        let level = self.selected().ok_or(LevelSelectionError::NothingSelected)?;
        self.deliver(level);
        Ok(level)
    }

    /// # Errors
    ///
    /// Returns `LevelSelectionError` unless the flow is picking.
    pub fn start_test(&mut self) -> Result<(), LevelSelectionError> {
        self.ensure_picking()?;
        self.mode = LevelSelectionMode::Testing;
        debug!("placement test opened");
        Ok(())
    }

    /// Leaves the placement test; any earlier highlight is forgotten.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError` unless the flow is testing.
    pub fn back_to_picking(&mut self) -> Result<(), LevelSelectionError> {
        self.ensure_testing()?;
        self.mode = LevelSelectionMode::Picking { selected: None };
        Ok(())
    }

    /// Delivers a level produced by the placement test.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError` unless the flow is testing.
    pub fn complete_test(&mut self, level: Level) -> Result<Level, LevelSelectionError> {
        self.ensure_testing()?;
        self.deliver(level);
        Ok(level)
    }

    /// Runs the placement test and delivers its level.
    ///
    /// On failure the flow stays in the test step so the learner can retry or go back.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError` if the flow is not testing, or the provider fails or times out.
    pub async fn run_placement_test(
        &mut self,
        placement: &PlacementService,
    ) -> Result<Level, LevelSelectionError> {
        self.ensure_testing()?;
        let level = placement.run().await?;
        self.complete_test(level)
    }

    /// Closes without a level.
    ///
    /// # Errors
    ///
    /// Returns `LevelSelectionError::Closed` if already closed.
    pub fn skip(&mut self) -> Result<(), LevelSelectionError> {
        if self.is_closed() {
            return Err(LevelSelectionError::Closed);
        }
        self.mode = LevelSelectionMode::Closed;
        self.outcome = Some(LevelOutcome::Skipped);
        self.on_confirm = None;
        info!("level selection skipped");
        Ok(())
    }

    fn deliver(&mut self, level: Level) {
        self.mode = LevelSelectionMode::Closed;
        self.outcome = Some(LevelOutcome::Confirmed(level));
        info!(%level, "level confirmed");
        if let Some(callback) = self.on_confirm.take() {
            callback(level);
        }
    }

    fn ensure_picking(&self) -> Result<(), LevelSelectionError> {
        match self.mode {
            LevelSelectionMode::Picking { .. } => Ok(()),
            LevelSelectionMode::Closed => Err(LevelSelectionError::Closed),
            LevelSelectionMode::Testing => Err(LevelSelectionError::WrongStep {
                expected: "picking",
            }),
        }
    }

    fn ensure_testing(&self) -> Result<(), LevelSelectionError> {
        match self.mode {
            LevelSelectionMode::Testing => Ok(()),
            LevelSelectionMode::Closed => Err(LevelSelectionError::Closed),
            LevelSelectionMode::Picking { .. } => Err(LevelSelectionError::WrongStep {
                expected: "testing",
            }),
        }
    }
}

impl fmt::Debug for LevelSelectionFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelSelectionFlow")
            .field("mode", &self.mode)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::SimulatedAssessment;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    fn recording() -> (Rc<RefCell<Vec<Level>>>, LevelSelectionFlow) {
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&delivered);
        let flow = LevelSelectionFlow::new(move |level| sink.borrow_mut().push(level));
        (delivered, flow)
    }

    #[test]
    fn direct_pick_delivers_exactly_that_level() {
        let (delivered, mut flow) = recording();
        flow.select(Level::A2).unwrap();
        flow.select(Level::B1).unwrap();
        assert_eq!(flow.selected(), Some(Level::B1));
        assert_eq!(flow.confirm().unwrap(), Level::B1);

        assert_eq!(*delivered.borrow(), vec![Level::B1]);
        assert!(flow.is_closed());
        assert_eq!(flow.outcome(), Some(LevelOutcome::Confirmed(Level::B1)));
    }

    #[test]
    fn confirm_requires_a_selection() {
        let (delivered, mut flow) = recording();
        assert_eq!(
            flow.confirm().unwrap_err(),
            LevelSelectionError::NothingSelected
        );
        assert!(delivered.borrow().is_empty());
        assert!(!flow.is_closed());
    }

    #[test]
    fn closed_flow_rejects_everything() {
        let (delivered, mut flow) = recording();
        flow.select(Level::C1).unwrap();
        flow.confirm().unwrap();
        assert_eq!(flow.select(Level::A1).unwrap_err(), LevelSelectionError::Closed);
        assert_eq!(flow.confirm().unwrap_err(), LevelSelectionError::Closed);
        assert_eq!(flow.start_test().unwrap_err(), LevelSelectionError::Closed);
        assert_eq!(flow.skip().unwrap_err(), LevelSelectionError::Closed);
        assert_eq!(delivered.borrow().len(), 1);
    }

    #[test]
    fn skip_closes_without_a_level() {
        let (delivered, mut flow) = recording();
        flow.select(Level::B2).unwrap();
        flow.skip().unwrap();
        assert!(delivered.borrow().is_empty());
        assert_eq!(flow.outcome(), Some(LevelOutcome::Skipped));
    }

    #[test]
    fn back_from_test_forgets_selection() {
        let (_, mut flow) = recording();
        flow.select(Level::B2).unwrap();
        flow.start_test().unwrap();
        assert_eq!(flow.mode(), LevelSelectionMode::Testing);
        assert!(matches!(
            flow.select(Level::A1),
            Err(LevelSelectionError::WrongStep { .. })
        ));
        flow.back_to_picking().unwrap();
        assert_eq!(flow.mode(), LevelSelectionMode::Picking { selected: None });
    }

    #[tokio::test(start_paused = true)]
    async fn placement_test_delivers_one_level() {
        let (delivered, mut flow) = recording();
        let placement = PlacementService::new(
            Arc::new(SimulatedAssessment::with_rng(
                Duration::from_millis(2000),
                StdRng::seed_from_u64(3),
            )),
            Duration::from_secs(10),
        );

        assert!(matches!(
            flow.run_placement_test(&placement).await,
            Err(LevelSelectionError::WrongStep { .. })
        ));
        flow.start_test().unwrap();
        let level = flow.run_placement_test(&placement).await.unwrap();

        assert!(Level::ALL.contains(&level));
        assert_eq!(*delivered.borrow(), vec![level]);
        assert!(flow.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_placement_keeps_testing() {
        let (delivered, mut flow) = recording();
        let placement = PlacementService::new(
            Arc::new(SimulatedAssessment::with_rng(
                Duration::from_secs(30),
                StdRng::seed_from_u64(3),
            )),
            Duration::from_secs(1),
        );
        flow.start_test().unwrap();
        assert_eq!(
            flow.run_placement_test(&placement).await.unwrap_err(),
            LevelSelectionError::Timeout(1000)
        );
        assert_eq!(flow.mode(), LevelSelectionMode::Testing);
        assert!(delivered.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_placement_can_be_retried() {
        let (delivered, mut flow) = recording();
        let slow = PlacementService::new(
            Arc::new(SimulatedAssessment::with_rng(
                Duration::from_secs(30),
                StdRng::seed_from_u64(3),
            )),
            Duration::from_secs(1),
        );
        let quick = PlacementService::new(
            Arc::new(SimulatedAssessment::with_rng(
                Duration::from_millis(200),
                StdRng::seed_from_u64(3),
            )),
            Duration::from_secs(1),
        );
        flow.start_test().unwrap();
        assert!(flow.run_placement_test(&slow).await.is_err());

        let level = flow.run_placement_test(&quick).await.unwrap();
        assert_eq!(*delivered.borrow(), vec![level]);
        assert!(flow.is_closed());
    }
}

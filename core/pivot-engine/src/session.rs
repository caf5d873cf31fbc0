//! FILENAME: core/pivot-engine/src/session.rs
//! Pivot Session - owns the inputs of one interactive pivot table.
//!
//! Hosts reconfigure a pivot table rapidly (field drag and drop), and a
//! computation may run on a worker while the next change arrives. Every
//! change to the records or the configuration bumps a generation counter;
//! a computation is started from a `ComputeTicket` that snapshots the inputs
//! and its result is only committed while that ticket is still current.
//! Late results are dropped, so the latest change always wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use crate::accessor::FieldAccessor;
use crate::definition::PivotConfiguration;
use crate::engine::{calculate_pivot, drill_down};
use crate::error::PivotError;
use crate::view::{PivotDrillDownData, PivotResult};

/// Default cap on drill-down detail records.
pub const DEFAULT_MAX_DRILL_DOWN_RECORDS: usize = 1000;

/// A committed result together with the inputs it was computed from.
struct Committed<R> {
    generation: u64,
    result: Arc<PivotResult>,
    records: Arc<[R]>,
    config: Arc<PivotConfiguration>,
}

struct SessionState<R> {
    records: Arc<[R]>,
    config: Arc<PivotConfiguration>,
    committed: Option<Committed<R>>,
    /// Drill-down of the last selected cell.
    selection: Option<Arc<PivotDrillDownData<R>>>,
}

/// Snapshot of the session inputs at one generation.
pub struct ComputeTicket<R, A> {
    generation: u64,
    records: Arc<[R]>,
    config: Arc<PivotConfiguration>,
    accessor: Arc<A>,
}

impl<R, A> ComputeTicket<R, A>
where
    A: FieldAccessor<R>,
{
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn configuration(&self) -> &PivotConfiguration {
        &self.config
    }

    /// Runs the computation on the calling thread.
    pub fn run(&self) -> PivotResult {
        calculate_pivot(&self.records[..], self.accessor.as_ref(), &self.config)
    }
}

/// Interactive pivot table state shared between a host UI and workers.
pub struct PivotSession<R, A> {
    accessor: Arc<A>,
    generation: AtomicU64,
    state: Mutex<SessionState<R>>,
}

impl<R, A> PivotSession<R, A>
where
    R: Clone,
    A: FieldAccessor<R>,
{
    pub fn new(records: Vec<R>, accessor: A, config: PivotConfiguration) -> Self {
        PivotSession {
            accessor: Arc::new(accessor),
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState {
                records: Arc::from(records),
                config: Arc::new(config),
                committed: None,
                selection: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState<R>> {
        // State is replaced wholesale, so a poisoned lock still holds consistent data
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The generation of the latest input change.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn configuration(&self) -> Arc<PivotConfiguration> {
        Arc::clone(&self.lock().config)
    }

    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    /// Replaces the configuration. Returns the new generation.
    pub fn set_configuration(&self, config: PivotConfiguration) -> u64 {
        let mut state = self.lock();
        state.config = Arc::new(config);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Edits a copy of the current configuration and installs it.
    pub fn update_configuration<F>(&self, edit: F) -> u64
    where
        F: FnOnce(&mut PivotConfiguration),
    {
        let mut state = self.lock();
        let mut config = PivotConfiguration::clone(&state.config);
        edit(&mut config);
        state.config = Arc::new(config);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Replaces the source records. Returns the new generation.
    pub fn set_records(&self, records: Vec<R>) -> u64 {
        let mut state = self.lock();
        state.records = Arc::from(records);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Snapshots the current inputs for a computation.
    pub fn begin(&self) -> ComputeTicket<R, A> {
        let state = self.lock();
        ComputeTicket {
            generation: self.generation(),
            records: Arc::clone(&state.records),
            config: Arc::clone(&state.config),
            accessor: Arc::clone(&self.accessor),
        }
    }

    /// Stores `result` if `ticket` is still the latest generation.
    /// A stale ticket leaves the current result untouched.
    pub fn commit(
        &self,
        ticket: &ComputeTicket<R, A>,
        result: PivotResult,
    ) -> Result<Arc<PivotResult>, PivotError> {
        let mut state = self.lock();
        let current = self.generation();
        if ticket.generation != current {
            log::debug!(
                target: "PIVOT",
                "dropping stale pivot result generation={} current={}",
                ticket.generation,
                current
            );
            return Err(PivotError::StaleComputation {
                ticket: ticket.generation,
                current,
            });
        }

        let result = Arc::new(result);
        state.committed = Some(Committed {
            generation: ticket.generation,
            result: Arc::clone(&result),
            records: Arc::clone(&ticket.records),
            config: Arc::clone(&ticket.config),
        });
        state.selection = None;
        Ok(result)
    }

    /// Computes and commits on the calling thread.
    pub fn refresh(&self) -> Result<Arc<PivotResult>, PivotError> {
        let ticket = self.begin();
        let result = ticket.run();
        self.commit(&ticket, result)
    }

    /// The last committed result, if any.
    pub fn result(&self) -> Option<Arc<PivotResult>> {
        self.lock().committed.as_ref().map(|c| Arc::clone(&c.result))
    }

    /// Generation of the last committed result.
    pub fn result_generation(&self) -> Option<u64> {
        self.lock().committed.as_ref().map(|c| c.generation)
    }

    /// True when the committed result reflects the latest inputs.
    pub fn is_current(&self) -> bool {
        self.result_generation() == Some(self.generation())
    }

    /// Drills into a cell of the committed result and caches the detail.
    ///
    /// Returns None when there is no committed result, the coordinates are
    /// out of range, or the row is a total row.
    pub fn select_cell(
        &self,
        row_index: usize,
        cell_index: usize,
        max_records: usize,
    ) -> Option<Arc<PivotDrillDownData<R>>> {
        let mut state = self.lock();
        let committed = state.committed.as_ref()?;
        let row = committed.result.rows.get(row_index)?;
        let cell = row.cells.get(cell_index)?;

        let detail = drill_down(
            row,
            cell,
            &committed.config,
            &committed.records[..],
            self.accessor.as_ref(),
            max_records,
        )?;
        let detail = Arc::new(detail);
        state.selection = Some(Arc::clone(&detail));
        Some(detail)
    }

    /// Drill-down of the last selected cell.
    pub fn selection(&self) -> Option<Arc<PivotDrillDownData<R>>> {
        self.lock().selection.clone()
    }

    pub fn clear_selection(&self) {
        self.lock().selection = None;
    }
}

//! Cooperative decode session
//!
//! One logical loop: acquire a frame, split it, commit or keep the record,
//! classify movement, report to the caller. Single control flow; the only
//! suspension point is the byte-source poll inside acquisition, and
//! cancellation is observed there between retries.

use crate::classifier::MovementClassifier;
use crate::error::{GpsRxError, Result};
use crate::parser::accumulator::{acquire_frame, AccumulatorConfig, FrameAccumulator};
use crate::parser::sentence::SentenceStatus;
use crate::parser::splitter::split_frame;
use crate::source::{ByteSource, CancelFlag};
use crate::types::{DecodeStats, MovementNotice, MovementState, NavigationRecord};
use std::time::Instant;

/// Result of one decode cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleOutcome {
    /// Whether a frame decoded and the record was committed this cycle.
    /// When false the frame was discarded and the previous record stands.
    pub decoded: bool,
    /// Movement state after classification
    pub state: MovementState,
    /// One-shot notice raised this cycle, if any
    pub notice: Option<MovementNotice>,
}

/// Owns the pipeline state for one feed: accumulator, navigation record,
/// movement classifier, and reception statistics.
pub struct FeedDecoder {
    accumulator: FrameAccumulator,
    record: NavigationRecord,
    classifier: MovementClassifier,
    stats: DecodeStats,
    stopped_streak: u32,
    flying_samples: u32,
    debug: bool,
}

impl FeedDecoder {
    pub fn new(debug: bool) -> Self {
        Self::with_config(AccumulatorConfig::default(), debug)
    }

    pub fn with_config(config: AccumulatorConfig, debug: bool) -> Self {
        Self {
            accumulator: FrameAccumulator::with_config(config, debug),
            record: NavigationRecord::new(),
            classifier: MovementClassifier::new(),
            stats: DecodeStats::default(),
            stopped_streak: 0,
            flying_samples: 0,
            debug,
        }
    }

    /// The last committed record; stale-but-valid after a discarded frame.
    pub fn record(&self) -> &NavigationRecord {
        &self.record
    }

    /// Consume the record for display; it reads cleared afterwards.
    pub fn take_record(&mut self) -> NavigationRecord {
        std::mem::take(&mut self.record)
    }

    pub fn classifier(&self) -> &MovementClassifier {
        &self.classifier
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Consecutive cycles classified Stopped, for the display collaborator
    pub fn stopped_streak(&self) -> u32 {
        self.stopped_streak
    }

    /// Run one acquire / split / classify cycle against the source.
    ///
    /// `NoUsableSentence` and frame overflow are absorbed as discarded
    /// cycles; source failures and cancellation propagate to the caller.
    pub fn run_cycle(
        &mut self,
        source: &mut dyn ByteSource,
        cancel: &CancelFlag,
    ) -> Result<CycleOutcome> {
        self.stats.cycles += 1;

        let wait_start = Instant::now();
        let decoded = match acquire_frame(source, &mut self.accumulator, cancel) {
            Ok(frame) => {
                self.stats.acquire_wait_ms += wait_start.elapsed().as_millis() as u64;
                self.stats.bytes_received += frame.len() as u64;
                self.stats.null_reads = self.accumulator.null_reads();
                match split_frame(&frame, self.debug) {
                    Ok(report) => {
                        if report.rmc == SentenceStatus::Valid {
                            self.stats.rmc_valid += 1;
                        }
                        if report.gga == SentenceStatus::Valid {
                            self.stats.gga_valid += 1;
                        }
                        self.record.write(report.record);
                        self.stats.frames_decoded += 1;
                        true
                    }
                    Err(GpsRxError::NoUsableSentence) => {
                        self.stats.frames_discarded += 1;
                        false
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(GpsRxError::FrameOverflow(_)) => {
                self.stats.acquire_wait_ms += wait_start.elapsed().as_millis() as u64;
                self.stats.frames_discarded += 1;
                false
            }
            Err(e) => {
                self.stats.null_reads = self.accumulator.null_reads();
                return Err(e);
            }
        };

        // Classification runs every cycle, split success or not, so a
        // stale record keeps the state machine fed.
        let notice = self
            .classifier
            .update(self.record.ground_speed_knots(), Instant::now());
        let state = self.classifier.state();

        // Streak bookkeeping for the display collaborator.
        match state {
            MovementState::Stopped => {
                self.stopped_streak = self.stopped_streak.saturating_add(1);
            }
            MovementState::Taxying => {}
            MovementState::Flying => {
                self.flying_samples += 1;
                if self.flying_samples >= 5 {
                    // Sustained flight; incidental zero-speed samples are over.
                    self.stopped_streak = 0;
                }
                if self.flying_samples > 1000 {
                    self.flying_samples = 0;
                }
            }
        }

        if self.debug {
            println!(
                "cycle {}: decoded={} state={} speed={}",
                self.stats.cycles,
                decoded,
                state,
                self.record.ground_speed
            );
        }

        Ok(CycleOutcome {
            decoded,
            state,
            notice,
        })
    }
}

use crate::booking::context::BookingContext;
use crate::calendar::navigation::select_date;
use crate::calendar::slots::{TimeSlot, TimeSlotProvider};
use crate::form::booking::CustomerInfo;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStep {
    SelectDate,
    SelectTime,
    Details,
    Confirm,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::SelectDate,
        BookingStep::SelectTime,
        BookingStep::Details,
        BookingStep::Confirm,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub date: NaiveDate,
    pub slot_id: String,
    pub time: String,
    pub customer: CustomerInfo,
}

/// In-memory booking flow: step index, per-step status and everything the
/// steps have collected so far.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    current: usize,
    statuses: Vec<StepStatus>,
    customer_info: Option<CustomerInfo>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        let mut statuses = vec![StepStatus::Pending; BookingStep::ALL.len()];
        statuses[0] = StepStatus::Active;
        Self {
            current: 0,
            statuses,
            customer_info: None,
            date: None,
            slot: None,
        }
    }

    pub fn len(&self) -> usize {
        BookingStep::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> BookingStep {
        BookingStep::ALL[self.current]
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.statuses
            .get(index)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.len()
    }

    pub fn advance(&mut self) {
        if self.has_next() {
            self.set_current_step(self.current + 1);
        }
    }

    pub fn back(&mut self) {
        self.set_current_step(self.current.saturating_sub(1));
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    /// Picking a different day drops the chosen time.
    pub fn select_date(&mut self, candidate: NaiveDate, today: NaiveDate) -> bool {
        let Some(date) = select_date(candidate, today) else {
            warn!(%candidate, "Booking date in the past ignored");
            return false;
        };
        if self.date != Some(date) {
            self.slot = None;
        }
        self.date = Some(date);
        true
    }

    /// Accepts only a slot the provider currently lists as available for the
    /// chosen date.
    pub fn select_slot(&mut self, slot_id: &str, provider: &impl TimeSlotProvider) -> bool {
        let Some(date) = self.date else {
            warn!(slot_id, "Time slot picked before a date");
            return false;
        };

        match provider
            .slots_for(date)
            .into_iter()
            .find(|slot| slot.id == slot_id)
        {
            Some(slot) if slot.available => {
                info!(slot_id, time = %slot.time, "Time slot selected");
                self.slot = Some(slot);
                true
            }
            Some(_) => {
                warn!(slot_id, "Time slot already taken");
                false
            }
            None => {
                warn!(slot_id, %date, "Unknown time slot");
                false
            }
        }
    }

    /// Furthest step the collected data allows: a date before the time step,
    /// a slot before the details and customer info before confirming.
    fn reachable(&self) -> usize {
        match (&self.date, &self.slot, &self.customer_info) {
            (None, _, _) => 0,
            (Some(_), None, _) => 1,
            (Some(_), Some(_), None) => 2,
            (Some(_), Some(_), Some(_)) => self.len() - 1,
        }
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        let date = self.date?;
        let slot = self.slot.as_ref()?;
        let customer = self.customer_info.clone()?;
        Some(BookingSummary {
            date,
            slot_id: slot.id.clone(),
            time: slot.time.clone(),
            customer,
        })
    }
}

impl BookingContext for BookingWizard {
    fn current_step(&self) -> usize {
        self.current
    }

    /// Clamps to the last step the wizard has data for. Steps before the new
    /// one are done; a step finished earlier stays done when the user goes
    /// back past it.
    fn set_current_step(&mut self, step: usize) {
        let reachable = self.reachable();
        let target = step.min(self.len() - 1);
        if target > reachable {
            warn!(
                requested = ?BookingStep::ALL[target],
                allowed = ?BookingStep::ALL[reachable],
                "Booking step needs earlier steps completed"
            );
        }
        let target = target.min(reachable);
        for (index, status) in self.statuses.iter_mut().enumerate() {
            *status = if index < target {
                StepStatus::Done
            } else if index == target {
                StepStatus::Active
            } else if *status == StepStatus::Done {
                StepStatus::Done
            } else {
                StepStatus::Pending
            };
        }

        if target != self.current {
            info!(
                from = ?self.current(),
                to = ?BookingStep::ALL[target],
                "Booking step changed"
            );
        }
        self.current = target;
    }

    fn customer_info(&self) -> Option<&CustomerInfo> {
        self.customer_info.as_ref()
    }

    fn set_customer_info(&mut self, info: CustomerInfo) {
        self.customer_info = Some(info);
    }
}

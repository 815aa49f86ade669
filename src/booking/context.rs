use crate::form::booking::CustomerInfo;

/// Host of the multi-step booking flow, as seen from a single step.
pub trait BookingContext {
    fn current_step(&self) -> usize;

    fn set_current_step(&mut self, step: usize);

    fn customer_info(&self) -> Option<&CustomerInfo>;

    fn set_customer_info(&mut self, info: CustomerInfo);
}

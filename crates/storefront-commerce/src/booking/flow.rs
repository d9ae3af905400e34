//! Booking wizard state machine.

use crate::booking::BookingSettings;
use crate::error::CommerceError;
use crate::ids::{BookingId, ServiceId};
use crate::money::Money;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Steps of the booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    /// Pick a service.
    Service,
    /// Pick a day.
    Date,
    /// Pick a start time. Skipped for full-day bookings.
    TimeSlot,
    /// Contact details.
    Details,
    /// Advance payment. Only when the merchant requires one.
    Payment,
    /// Booking placed.
    Confirmation,
}

impl BookingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::Service => "service",
            BookingStep::Date => "date",
            BookingStep::TimeSlot => "time_slot",
            BookingStep::Details => "details",
            BookingStep::Payment => "payment",
            BookingStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStep::Service => "Service",
            BookingStep::Date => "Date",
            BookingStep::TimeSlot => "Time",
            BookingStep::Details => "Your details",
            BookingStep::Payment => "Payment",
            BookingStep::Confirmation => "Confirmation",
        }
    }

    /// Parse a step name as produced by [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "service" => Some(BookingStep::Service),
            "date" => Some(BookingStep::Date),
            "time_slot" | "time" => Some(BookingStep::TimeSlot),
            "details" => Some(BookingStep::Details),
            "payment" => Some(BookingStep::Payment),
            "confirmation" => Some(BookingStep::Confirmation),
            _ => None,
        }
    }
}

/// The wizard's steps for a merchant's settings, in order.
pub fn booking_steps(settings: &BookingSettings) -> Vec<BookingStep> {
    let mut steps = vec![BookingStep::Service, BookingStep::Date];
    if !settings.full_day {
        steps.push(BookingStep::TimeSlot);
    }
    steps.push(BookingStep::Details);
    if settings.require_advance_payment {
        steps.push(BookingStep::Payment);
    }
    steps.push(BookingStep::Confirmation);
    steps
}

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingService {
    pub id: ServiceId,
    pub name: String,
    pub price: Money,
    pub duration_minutes: u32,
}

/// Contact details collected before a booking is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub note: Option<String>,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            note: None,
        }
    }

    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.chars().filter(|c| c.is_ascii_digit()).count() < 7 {
            missing.push("phone");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Booking wizard state.
///
/// The step list is fixed at creation; navigation only moves `current`
/// within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingFlow {
    pub id: BookingId,
    pub settings: BookingSettings,
    steps: Vec<BookingStep>,
    current: usize,
    completed: Vec<BookingStep>,
    pub service: Option<BookingService>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<NaiveTime>,
    pub customer: Option<CustomerDetails>,
    /// Reference of the advance payment, once made.
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingFlow {
    pub fn new(settings: BookingSettings) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::generate(),
            settings,
            steps: booking_steps(&settings),
            current: 0,
            completed: Vec::new(),
            service: None,
            date: None,
            time_slot: None,
            customer: None,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn steps(&self) -> &[BookingStep] {
        &self.steps
    }

    pub fn step(&self) -> BookingStep {
        self.steps
            .get(self.current)
            .copied()
            .unwrap_or(BookingStep::Confirmation)
    }

    /// Zero-based position of the current step.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn completed_steps(&self) -> &[BookingStep] {
        &self.completed
    }

    pub fn is_confirmed(&self) -> bool {
        self.step() == BookingStep::Confirmation
    }

    /// Share of the wizard reached, in percent.
    pub fn progress_percent(&self) -> u8 {
        ((self.current + 1) * 100 / self.steps.len()) as u8
    }

    pub fn select_service(&mut self, service: BookingService) {
        self.service = Some(service);
        self.touch();
    }

    /// Pick a day. A previously chosen time slot is cleared when the day
    /// changes.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) && self.time_slot.take().is_some() {
            self.completed.retain(|s| *s != BookingStep::TimeSlot);
        }
        self.date = Some(date);
        self.touch();
    }

    pub fn select_time_slot(&mut self, slot: NaiveTime) {
        self.time_slot = Some(slot);
        self.touch();
    }

    pub fn set_customer(&mut self, customer: CustomerDetails) {
        self.customer = Some(customer);
        self.touch();
    }

    pub fn set_payment_reference(&mut self, reference: impl Into<String>) {
        self.payment_reference = Some(reference.into());
        self.touch();
    }

    /// What must be filled in before `step` can be left.
    pub fn missing_for_step(&self, step: BookingStep) -> Vec<&'static str> {
        match step {
            BookingStep::Service if self.service.is_none() => vec!["service"],
            BookingStep::Date if self.date.is_none() => vec!["date"],
            BookingStep::TimeSlot if self.time_slot.is_none() => vec!["time slot"],
            BookingStep::Details => match &self.customer {
                Some(customer) => customer.missing_fields(),
                None => vec!["name", "phone"],
            },
            BookingStep::Payment if self.payment_reference.is_none() => vec!["payment"],
            _ => Vec::new(),
        }
    }

    /// Advance to the next step if the current one is satisfied.
    pub fn next(&mut self) -> Result<BookingStep, CommerceError> {
        let from = self.step();
        let Some(&next) = self.steps.get(self.current + 1) else {
            return Err(CommerceError::InvalidBookingTransition {
                from: from.as_str().to_string(),
                to: "none".to_string(),
            });
        };

        let missing = self.missing_for_step(from);
        if !missing.is_empty() {
            return Err(CommerceError::BookingIncomplete(missing.join(", ")));
        }

        if !self.completed.contains(&from) {
            self.completed.push(from);
        }
        self.current += 1;
        self.touch();
        tracing::debug!(booking = %self.id, from = from.as_str(), to = next.as_str(), "booking advanced");

        Ok(next)
    }

    /// Go back one step.
    pub fn back(&mut self) -> Result<BookingStep, CommerceError> {
        if self.current == 0 {
            return Err(CommerceError::InvalidBookingTransition {
                from: self.step().as_str().to_string(),
                to: "none".to_string(),
            });
        }
        if self.is_confirmed() {
            return Err(CommerceError::InvalidBookingTransition {
                from: self.step().as_str().to_string(),
                to: self.steps[self.current - 1].as_str().to_string(),
            });
        }

        self.current -= 1;
        self.touch();
        Ok(self.step())
    }

    /// Jump to the current step or any step already completed.
    ///
    /// Jumping forward re-checks every step passed over.
    pub fn go_to(&mut self, step: BookingStep) -> Result<(), CommerceError> {
        let target = self.steps.iter().position(|s| *s == step);
        match target {
            Some(index) if index == self.current => Ok(()),
            Some(index) if self.completed.contains(&step) && !self.is_confirmed() => {
                if index > self.current {
                    let missing: Vec<&str> = self.steps[self.current..index]
                        .iter()
                        .flat_map(|s| self.missing_for_step(*s))
                        .collect();
                    if !missing.is_empty() {
                        return Err(CommerceError::BookingIncomplete(missing.join(", ")));
                    }
                }
                self.current = index;
                self.touch();
                Ok(())
            }
            _ => Err(CommerceError::InvalidBookingTransition {
                from: self.step().as_str().to_string(),
                to: step.as_str().to_string(),
            }),
        }
    }

    /// Amount to pay up front, when the merchant requires it.
    pub fn advance_due(&self) -> Option<Money> {
        if !self.settings.require_advance_payment {
            return None;
        }
        self.service
            .as_ref()
            .map(|service| service.price.percentage(self.settings.advance_percent))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn haircut() -> BookingService {
        BookingService {
            id: ServiceId::new("svc-1"),
            name: "Haircut".into(),
            price: Money::from_major(800, Currency::INR),
            duration_minutes: 45,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn ten_am() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn paid_full_day() -> BookingSettings {
        BookingSettings {
            full_day: true,
            require_advance_payment: true,
            advance_percent: 25,
        }
    }

    fn paid_full_day_with_slots() -> BookingSettings {
        BookingSettings {
            full_day: false,
            ..paid_full_day()
        }
    }

    #[test]
    fn test_steps_for_settings() {
        use BookingStep::*;

        assert_eq!(
            booking_steps(&BookingSettings::default()),
            vec![Service, Date, TimeSlot, Details, Confirmation]
        );
        assert_eq!(
            booking_steps(&paid_full_day()),
            vec![Service, Date, Details, Payment, Confirmation]
        );
    }

    #[test]
    fn test_step_names_round_trip() {
        for step in booking_steps(&BookingSettings {
            require_advance_payment: true,
            ..Default::default()
        }) {
            assert_eq!(BookingStep::from_name(step.as_str()), Some(step));
        }
        assert_eq!(BookingStep::from_name("Time-Slot"), Some(BookingStep::TimeSlot));
        assert_eq!(BookingStep::from_name("checkout"), None);
    }

    #[test]
    fn test_next_requires_current_step_data() {
        let mut flow = BookingFlow::new(BookingSettings::default());
        assert!(matches!(flow.next(), Err(CommerceError::BookingIncomplete(_))));

        flow.select_service(haircut());
        assert_eq!(flow.next().unwrap(), BookingStep::Date);
        flow.select_date(day());
        assert_eq!(flow.next().unwrap(), BookingStep::TimeSlot);
        assert!(flow.next().is_err());
        flow.select_time_slot(ten_am());
        assert_eq!(flow.next().unwrap(), BookingStep::Details);
    }

    #[test]
    fn test_details_validation() {
        let mut flow = BookingFlow::new(paid_full_day());
        flow.select_service(haircut());
        flow.next().unwrap();
        flow.select_date(day());
        flow.next().unwrap();

        flow.set_customer(CustomerDetails::new("  ", "98"));
        match flow.next() {
            Err(CommerceError::BookingIncomplete(missing)) => assert_eq!(missing, "name, phone"),
            other => panic!("expected incomplete, got {:?}", other),
        }

        flow.set_customer(CustomerDetails::new("Asha", "+91 98765 43210"));
        assert_eq!(flow.next().unwrap(), BookingStep::Payment);
    }

    #[test]
    fn test_full_flow_to_confirmation() {
        let mut flow = BookingFlow::new(paid_full_day());
        flow.select_service(haircut());
        flow.next().unwrap();
        flow.select_date(day());
        flow.next().unwrap();
        flow.set_customer(CustomerDetails::new("Asha", "9876543210"));
        flow.next().unwrap();
        flow.set_payment_reference("pay_123");
        assert_eq!(flow.next().unwrap(), BookingStep::Confirmation);

        assert!(flow.is_confirmed());
        assert_eq!(flow.progress_percent(), 100);
        assert!(matches!(
            flow.next(),
            Err(CommerceError::InvalidBookingTransition { .. })
        ));
        assert!(flow.back().is_err());
    }

    #[test]
    fn test_back_and_go_to() {
        let mut flow = BookingFlow::new(BookingSettings::default());
        assert!(flow.back().is_err());

        flow.select_service(haircut());
        flow.next().unwrap();
        flow.select_date(day());
        flow.next().unwrap();

        assert_eq!(flow.back().unwrap(), BookingStep::Date);
        flow.go_to(BookingStep::Service).unwrap();
        assert_eq!(flow.step(), BookingStep::Service);
        flow.go_to(BookingStep::Date).unwrap();
        assert_eq!(flow.step(), BookingStep::Date);

        assert!(flow.go_to(BookingStep::Details).is_err());
        assert!(flow.go_to(BookingStep::Payment).is_err());
    }

    #[test]
    fn test_go_to_forward_rechecks_skipped_steps() {
        let mut flow = BookingFlow::new(paid_full_day_with_slots());
        flow.select_service(haircut());
        flow.next().unwrap();
        flow.select_date(day());
        flow.next().unwrap();
        flow.select_time_slot(ten_am());
        flow.next().unwrap();
        flow.set_customer(CustomerDetails::new("Asha", "9876543210"));
        assert_eq!(flow.next().unwrap(), BookingStep::Payment);

        flow.back().unwrap();
        flow.back().unwrap();
        flow.back().unwrap();
        assert_eq!(flow.step(), BookingStep::Date);

        flow.select_date(day().succ_opt().unwrap());
        assert!(!flow.completed_steps().contains(&BookingStep::TimeSlot));
        match flow.go_to(BookingStep::Details) {
            Err(CommerceError::BookingIncomplete(missing)) => assert_eq!(missing, "time slot"),
            other => panic!("expected incomplete, got {:?}", other),
        }
        assert_eq!(flow.step(), BookingStep::Date);

        flow.next().unwrap();
        assert!(flow.next().is_err());
        flow.select_time_slot(ten_am());
        assert_eq!(flow.next().unwrap(), BookingStep::Details);

        flow.go_to(BookingStep::Service).unwrap();
        flow.go_to(BookingStep::Details).unwrap();
        assert_eq!(flow.step(), BookingStep::Details);
        assert!(flow.go_to(BookingStep::Payment).is_err());
    }

    #[test]
    fn test_changing_date_clears_slot() {
        let mut flow = BookingFlow::new(BookingSettings::default());
        flow.select_date(day());
        flow.select_time_slot(ten_am());

        flow.select_date(day());
        assert_eq!(flow.time_slot, Some(ten_am()));

        flow.select_date(day().succ_opt().unwrap());
        assert_eq!(flow.time_slot, None);
    }

    #[test]
    fn test_advance_due() {
        let mut flow = BookingFlow::new(paid_full_day());
        assert_eq!(flow.advance_due(), None);

        flow.select_service(haircut());
        assert_eq!(flow.advance_due(), Some(Money::from_major(200, Currency::INR)));

        let mut free = BookingFlow::new(BookingSettings::default());
        free.select_service(haircut());
        assert_eq!(free.advance_due(), None);
    }

    #[test]
    fn test_flow_serializes() {
        let mut flow = BookingFlow::new(BookingSettings::default());
        flow.select_service(haircut());
        flow.next().unwrap();

        let json = serde_json::to_string(&flow).unwrap();
        let restored: BookingFlow = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.step(), BookingStep::Date);
        assert_eq!(restored.completed_steps(), &[BookingStep::Service]);
    }
}

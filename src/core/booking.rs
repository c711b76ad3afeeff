use crate::core::fare::{calculate_fare, check_capacity};
use crate::domain::model::{
    Booking, BookingDraft, ContactDetails, FareRequest, LuggageSize, VehicleCapacity,
};
use crate::domain::tariff::Tariff;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_phone, validate_required_field,
};
use chrono::NaiveDateTime;
use rand::Rng;
use std::fmt;

const REFERENCE_LETTERS: usize = 3;
const REFERENCE_DIGITS: usize = 6;

/// The four wizard steps, always walked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingStep {
    Trip = 1,
    Schedule = 2,
    Passengers = 3,
    Contact = 4,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::Trip,
        BookingStep::Schedule,
        BookingStep::Passengers,
        BookingStep::Contact,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Trip => Some(BookingStep::Schedule),
            BookingStep::Schedule => Some(BookingStep::Passengers),
            BookingStep::Passengers => Some(BookingStep::Contact),
            BookingStep::Contact => None,
        }
    }

    pub fn previous(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Trip => None,
            BookingStep::Schedule => Some(BookingStep::Trip),
            BookingStep::Passengers => Some(BookingStep::Schedule),
            BookingStep::Contact => Some(BookingStep::Passengers),
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStep::Trip => "trip",
            BookingStep::Schedule => "schedule",
            BookingStep::Passengers => "passengers",
            BookingStep::Contact => "contact",
        };
        write!(f, "{} ({}/4)", label, self.number())
    }
}

pub fn passenger_options(capacity: &VehicleCapacity) -> Vec<u32> {
    (1..=capacity.max_passengers).collect()
}

pub fn luggage_options(capacity: &VehicleCapacity, size: LuggageSize) -> Vec<u32> {
    (0..=capacity.luggage(size)).collect()
}

/// Builds the fare request from the trip and passenger fields of a draft.
pub fn fare_request(draft: &BookingDraft) -> Result<FareRequest> {
    let direction = *validate_required_field("direction", &draft.direction)?;
    let zone = validate_required_field("zone", &draft.zone)?;
    let vehicle = *validate_required_field("vehicle", &draft.vehicle)?;
    let passengers = draft.passengers.unwrap_or(1);

    Ok(FareRequest::new(zone.clone(), vehicle, direction, passengers).with_luggage(
        draft.large_luggage,
        draft.medium_luggage,
        draft.small_luggage,
    ))
}

pub fn validate_step(
    draft: &BookingDraft,
    step: BookingStep,
    tariff: &Tariff,
    now: NaiveDateTime,
) -> Result<()> {
    match step {
        BookingStep::Trip => {
            validate_required_field("direction", &draft.direction)?;
            let zone = validate_required_field("zone", &draft.zone)?;
            tariff.zone(zone)?;
            let vehicle = validate_required_field("vehicle", &draft.vehicle)?;
            tariff.vehicle(*vehicle)?;
        }
        BookingStep::Schedule => {
            let date = validate_required_field("date", &draft.date)?;
            let time = validate_required_field("time", &draft.time)?;
            if date.and_time(*time) < now {
                return Err(FareError::validation(
                    "date",
                    "La fecha y hora del traslado no pueden estar en el pasado",
                ));
            }
        }
        BookingStep::Passengers => {
            validate_required_field("passengers", &draft.passengers)?;
            let vehicle = validate_required_field("vehicle", &draft.vehicle)?;
            let capacity = tariff.vehicle(*vehicle)?;
            check_capacity(capacity, &fare_request(draft)?)?;
        }
        BookingStep::Contact => {
            let name = validate_required_field("contact_name", &draft.contact_name)?;
            validate_non_empty_string("contact_name", name)?;
            let email = validate_required_field("contact_email", &draft.contact_email)?;
            validate_email("contact_email", email)?;
            let phone = validate_required_field("contact_phone", &draft.contact_phone)?;
            validate_phone("contact_phone", phone)?;
        }
    }
    Ok(())
}

/// The first step whose fields do not validate, or `None` when the draft is
/// ready to confirm.
pub fn first_incomplete_step(
    draft: &BookingDraft,
    tariff: &Tariff,
    now: NaiveDateTime,
) -> Option<BookingStep> {
    BookingStep::ALL
        .into_iter()
        .find(|&step| validate_step(draft, step, tariff, now).is_err())
}

/// Linear wizard over a draft: forward only when the current step validates,
/// backward freely.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: BookingStep,
    draft: BookingDraft,
}

impl BookingWizard {
    pub fn new(draft: BookingDraft) -> Self {
        Self {
            step: BookingStep::Trip,
            draft,
        }
    }

    /// Resumes a stored draft at the first step still missing data.
    pub fn resume(draft: BookingDraft, tariff: &Tariff, now: NaiveDateTime) -> Self {
        let step = first_incomplete_step(&draft, tariff, now).unwrap_or(BookingStep::Contact);
        Self { step, draft }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn into_draft(self) -> BookingDraft {
        self.draft
    }

    /// Validates the current step and moves to the next one. On the last
    /// step the wizard stays put.
    pub fn advance(&mut self, tariff: &Tariff, now: NaiveDateTime) -> Result<BookingStep> {
        validate_step(&self.draft, self.step, tariff, now)?;
        if let Some(next) = self.step.next() {
            tracing::debug!("wizard {} -> {}", self.step, next);
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }
}

/// Three uppercase letters followed by six digits, e.g. `KQZ042917`.
pub fn generate_booking_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut reference = String::with_capacity(REFERENCE_LETTERS + REFERENCE_DIGITS);
    for _ in 0..REFERENCE_LETTERS {
        reference.push(rng.gen_range(b'A'..=b'Z') as char);
    }
    for _ in 0..REFERENCE_DIGITS {
        reference.push(rng.gen_range(b'0'..=b'9') as char);
    }
    reference
}

/// Validates every step, prices the trip and issues a reference.
pub fn confirm<R: Rng + ?Sized>(
    draft: &BookingDraft,
    tariff: &Tariff,
    now: NaiveDateTime,
    rng: &mut R,
) -> Result<Booking> {
    for step in BookingStep::ALL {
        validate_step(draft, step, tariff, now)?;
    }

    let request = fare_request(draft)?;
    let price = calculate_fare(tariff, &request)?;

    let date = *validate_required_field("date", &draft.date)?;
    let time = *validate_required_field("time", &draft.time)?;
    let contact = ContactDetails {
        name: validate_required_field("contact_name", &draft.contact_name)?
            .trim()
            .to_string(),
        email: validate_required_field("contact_email", &draft.contact_email)?
            .trim()
            .to_string(),
        phone: validate_required_field("contact_phone", &draft.contact_phone)?
            .trim()
            .to_string(),
    };

    let booking = Booking {
        reference: generate_booking_reference(rng),
        request,
        date,
        time,
        flight_number: non_blank(&draft.flight_number),
        contact,
        notes: non_blank(&draft.notes),
        price,
        created_at: now,
    };

    tracing::info!(
        reference = %booking.reference,
        zone = %booking.price.destination,
        total = booking.price.total_price,
        "booking confirmed"
    );

    Ok(booking)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Direction, VehicleKind};
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            direction: Some(Direction::FromAirport),
            zone: Some("providencia".to_string()),
            vehicle: Some(VehicleKind::Taxi),
            date: NaiveDate::from_ymd_opt(2024, 3, 2),
            time: NaiveTime::from_hms_opt(6, 30, 0),
            passengers: Some(3),
            large_luggage: 2,
            medium_luggage: 1,
            small_luggage: 0,
            flight_number: Some(" LA800 ".to_string()),
            contact_name: Some("Camila Rojas".to_string()),
            contact_email: Some("camila@example.cl".to_string()),
            contact_phone: Some("+56 9 8765 4321".to_string()),
            notes: Some("   ".to_string()),
            saved_at: None,
        }
    }

    #[test]
    fn test_option_lists_follow_capacity() {
        let tariff = Tariff::builtin();
        let taxi = tariff.vehicle(VehicleKind::Taxi).unwrap();
        assert_eq!(passenger_options(taxi), vec![1, 2, 3, 4]);
        assert_eq!(luggage_options(taxi, LuggageSize::Large), vec![0, 1, 2]);

        let suv = tariff.vehicle(VehicleKind::Suv).unwrap();
        assert_eq!(passenger_options(suv).len(), 6);
        assert_eq!(luggage_options(suv, LuggageSize::Small).last(), Some(&6));
    }

    #[test]
    fn test_empty_draft_starts_at_trip() {
        let tariff = Tariff::builtin();
        assert_eq!(
            first_incomplete_step(&BookingDraft::default(), &tariff, now()),
            Some(BookingStep::Trip)
        );
        assert_eq!(first_incomplete_step(&complete_draft(), &tariff, now()), None);
    }

    #[test]
    fn test_past_schedule_is_rejected() {
        let tariff = Tariff::builtin();
        let mut draft = complete_draft();
        draft.date = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(
            first_incomplete_step(&draft, &tariff, now()),
            Some(BookingStep::Schedule)
        );
    }

    #[test]
    fn test_schedule_at_exactly_now_is_accepted() {
        let tariff = Tariff::builtin();
        let mut draft = complete_draft();
        draft.date = Some(now().date());
        draft.time = Some(now().time());
        assert!(validate_step(&draft, BookingStep::Schedule, &tariff, now()).is_ok());

        draft.time = NaiveTime::from_hms_opt(8, 59, 59);
        assert!(matches!(
            validate_step(&draft, BookingStep::Schedule, &tariff, now()),
            Err(FareError::ValidationError { ref field, .. }) if field == "date"
        ));
    }

    #[test]
    fn test_wizard_only_advances_on_valid_step() {
        let tariff = Tariff::builtin();
        let mut wizard = BookingWizard::new(BookingDraft::default());
        assert!(wizard.advance(&tariff, now()).is_err());
        assert_eq!(wizard.step(), BookingStep::Trip);

        wizard.draft_mut().direction = Some(Direction::ToAirport);
        wizard.draft_mut().zone = Some("Maipú".to_string());
        wizard.draft_mut().vehicle = Some(VehicleKind::Suv);
        assert_eq!(wizard.advance(&tariff, now()).unwrap(), BookingStep::Schedule);

        assert_eq!(wizard.back(), BookingStep::Trip);
        assert_eq!(wizard.back(), BookingStep::Trip);
    }

    #[test]
    fn test_wizard_resume_and_last_step() {
        let tariff = Tariff::builtin();
        let mut draft = complete_draft();
        draft.contact_email = Some("not-an-email".to_string());
        let mut wizard = BookingWizard::resume(draft, &tariff, now());
        assert_eq!(wizard.step(), BookingStep::Contact);
        assert!(wizard.advance(&tariff, now()).is_err());

        wizard.draft_mut().contact_email = Some("camila@example.cl".to_string());
        assert_eq!(wizard.advance(&tariff, now()).unwrap(), BookingStep::Contact);
    }

    #[test]
    fn test_passenger_step_enforces_capacity() {
        let tariff = Tariff::builtin();
        let mut draft = complete_draft();
        draft.passengers = Some(5);
        assert!(matches!(
            validate_step(&draft, BookingStep::Passengers, &tariff, now()),
            Err(FareError::CapacityExceeded { .. })
        ));
        draft.vehicle = Some(VehicleKind::Suv);
        assert!(validate_step(&draft, BookingStep::Passengers, &tariff, now()).is_ok());
    }

    #[test]
    fn test_reference_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reference = generate_booking_reference(&mut rng);
            assert_eq!(reference.len(), 9);
            assert!(reference[..3].chars().all(|c| c.is_ascii_uppercase()));
            assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_confirm_prices_and_cleans_fields() {
        let tariff = Tariff::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        let booking = confirm(&complete_draft(), &tariff, now(), &mut rng).unwrap();

        assert_eq!(booking.price.destination, "Providencia");
        assert_eq!(booking.price.total_price, 27000 + 3000);
        assert_eq!(booking.flight_number.as_deref(), Some("LA800"));
        assert_eq!(booking.notes, None);
        assert_eq!(booking.created_at, now());
        assert_eq!(booking.request.passengers, 3);
    }

    #[test]
    fn test_confirm_rejects_incomplete_draft() {
        let tariff = Tariff::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let mut draft = complete_draft();
        draft.contact_phone = None;
        assert!(matches!(
            confirm(&draft, &tariff, now(), &mut rng),
            Err(FareError::ValidationError { .. })
        ));
    }
}

//! Booking wizard commands.

use anyhow::{Context as _, Result};
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use storefront_commerce::booking::{
    booking_steps, BookingFlow, BookingService, BookingSettings, CustomerDetails,
};
use storefront_commerce::{Money, ServiceId};

use super::{BookingArgs, BookingCommand};
use crate::context::Context;

/// Run the booking command.
pub fn run(args: BookingArgs, ctx: &Context) -> Result<()> {
    let settings = settings_for(&args, ctx.config.booking);
    settings.validate()?;

    match args.command {
        BookingCommand::Steps => steps(settings, ctx),
        BookingCommand::Plan {
            service,
            price,
            duration,
            date,
            time,
            name,
            phone,
            payment_ref,
        } => {
            let service = BookingService {
                id: ServiceId::new(storefront_commerce::showcase::slugify(&service)),
                name: service,
                price: Money::from_decimal(price, ctx.config.currency()?),
                duration_minutes: duration,
            };
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date: {}", date))?;
            let time = time
                .map(|t| {
                    NaiveTime::parse_from_str(&t, "%H:%M").with_context(|| format!("Invalid time: {}", t))
                })
                .transpose()?;

            let answers = Answers {
                service,
                date,
                time,
                customer: CustomerDetails::new(name, phone),
                payment_ref,
            };
            plan(settings, answers, ctx)
        }
    }
}

fn settings_for(args: &BookingArgs, mut settings: BookingSettings) -> BookingSettings {
    if args.full_day {
        settings.full_day = true;
    }
    if let Some(percent) = args.advance_percent {
        settings.require_advance_payment = true;
        settings.advance_percent = percent;
    }
    settings
}

fn steps(settings: BookingSettings, ctx: &Context) -> Result<()> {
    let steps = booking_steps(&settings);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "settings": settings, "steps": steps }));
        return Ok(());
    }

    ctx.output.header("Booking steps");
    for (i, step) in steps.iter().enumerate() {
        ctx.output.step(i + 1, steps.len(), step.display_name(), false);
    }
    Ok(())
}

struct Answers {
    service: BookingService,
    date: NaiveDate,
    time: Option<NaiveTime>,
    customer: CustomerDetails,
    payment_ref: Option<String>,
}

/// Feed the answers through the wizard until it stops.
fn plan(settings: BookingSettings, answers: Answers, ctx: &Context) -> Result<()> {
    let mut flow = BookingFlow::new(settings);
    flow.select_service(answers.service);
    flow.select_date(answers.date);
    if let Some(time) = answers.time {
        flow.select_time_slot(time);
    }
    flow.set_customer(answers.customer);
    if let Some(reference) = answers.payment_ref {
        flow.set_payment_reference(reference);
    }

    let mut blocked = None;
    while !flow.is_confirmed() {
        if let Err(e) = flow.next() {
            blocked = Some(e.to_string());
            break;
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "step": flow.step(),
            "confirmed": flow.is_confirmed(),
            "blocked": blocked,
            "advance_due": flow.advance_due(),
            "booking": flow,
        }));
        return Ok(());
    }

    ctx.output.header("Booking");
    let total = flow.steps().len();
    for (i, step) in flow.steps().iter().enumerate() {
        ctx.output.step(i + 1, total, step.display_name(), i == flow.position());
    }
    if let Some(due) = flow.advance_due() {
        ctx.output.kv("advance due", &due.display());
    }

    match blocked {
        Some(reason) => ctx.output.warn(&format!("Stopped at {}: {}", flow.step().display_name(), reason)),
        None => ctx.output.success(&format!("Booking {} confirmed", flow.id)),
    }
    Ok(())
}

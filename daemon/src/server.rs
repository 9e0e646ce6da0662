use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use hometime_composer::color::BLACK;
use hometime_composer::{
    CalendarEvent, DisplayScheduler, Effect, Instant, PixelBuffer, RainbowCycle, TickAction,
    Weekday, parse_agenda, render_with_marker_level, time_of_day,
};
use log::{debug, error, info};
use tokio::time::{Instant as TokioInstant, MissedTickBehavior};

use crate::calendar::CalendarSource;
use crate::config::{MAX_LEDS, Settings};
use crate::wled::WledClient;

fn weekday<Tz: TimeZone>(now: &DateTime<Tz>) -> Weekday {
    match now.weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

/// Drives the strip: one display update per tick
pub struct HometimeServer {
    settings: Settings,
    wled: WledClient,
    calendar: Option<CalendarSource>,
    scheduler: DisplayScheduler,
}

impl HometimeServer {
    pub fn new(settings: Settings, dry_run: bool) -> Result<Self> {
        let wled = WledClient::new(
            &settings.wled_url,
            settings.wled_timeout,
            settings.max_segments,
            dry_run,
        )?;
        let calendar = settings.calendar.clone().map(CalendarSource::new);
        let scheduler = DisplayScheduler::new()
            .with_flash(settings.flash_marker)
            .with_dimmed_level(settings.marker_dim_level);

        Ok(Self {
            settings,
            wled,
            calendar,
            scheduler,
        })
    }

    /// Update the display now, then once per tick interval. Never returns.
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.settings.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "Hometime running, updating {} every {:?}",
            self.wled.state_url(),
            self.settings.tick_interval
        );

        loop {
            interval.tick().await;
            self.update_display().await;
        }
    }

    /// Run one tick; on failure switch the strip off
    pub async fn update_display(&mut self) {
        if let Err(e) = self.try_update(Local::now()).await {
            error!("Error updating display: {e:#}");
            if let Err(e) = self.wled.turn_off().await {
                error!("Error turning off LEDs: {e}");
            }
        }
    }

    async fn try_update<Tz: TimeZone>(&mut self, now: DateTime<Tz>) -> Result<()> {
        let hours = time_of_day(now.hour(), now.minute());
        let day = weekday(&now);
        let bounds = self.settings.schedule.for_day(day);
        let action = self.scheduler.tick(bounds, hours);
        debug!(
            "Current time: {hours:.2} on {}, bounds {bounds:?}, action {action:?}",
            day.as_str()
        );

        match action {
            TickAction::ShowDay { marker_level } => {
                let agenda = match self.calendar.as_ref() {
                    Some(calendar) => calendar.fetch_agenda(now.date_naive()).await,
                    None => String::new(),
                };
                let events: Vec<CalendarEvent<'_>> = parse_agenda(&agenda).collect();
                debug!("{} calendar events today", events.len());

                let frame = render_with_marker_level::<MAX_LEDS>(
                    hours,
                    bounds,
                    &events,
                    &self.settings.render,
                    marker_level,
                );
                self.wled.show_frame(&frame, &self.settings.render).await?;
            }
            TickAction::Celebrate => {
                info!("Work day ended, showing rainbow celebration");
                if let Err(e) = self.celebrate().await {
                    self.scheduler.celebration_failed();
                    return Err(e);
                }
                self.wled.turn_off().await?;
            }
            TickAction::Idle => {}
        }
        Ok(())
    }

    /// Play the rainbow cycle in real time
    async fn celebrate(&mut self) -> Result<()> {
        let started = TokioInstant::now();
        let mut rainbow = RainbowCycle::new(Instant::from_millis(0));
        let delay = Duration::from_micros(rainbow.step_delay().as_micros());
        let mut frame = PixelBuffer::<MAX_LEDS>::filled(self.settings.render.led_count, BLACK);

        loop {
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let now = Instant::from_millis(elapsed);
            rainbow.render(now, frame.as_mut_slice());
            self.wled.show_pixels(&frame).await?;
            if rainbow.is_finished(now) {
                return Ok(());
            }
            tokio::time::sleep(delay).await;
        }
    }

    pub async fn stop(&self) {
        info!("Hometime stopping...");
    }
}

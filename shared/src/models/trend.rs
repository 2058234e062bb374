//! Per-day nutrient series for trend charts

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::soil::{NutrientKind, SoilReading};

/// One calendar day of nutrient values, keyed by canonical label on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "pH Level")]
    pub ph: f64,
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    #[serde(rename = "Electrical Conductivity")]
    pub ec: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl TrendPoint {
    pub fn value_of(&self, kind: NutrientKind) -> f64 {
        match kind {
            NutrientKind::Nitrogen => self.nitrogen,
            NutrientKind::Phosphorus => self.phosphorus,
            NutrientKind::Potassium => self.potassium,
            NutrientKind::Ph => self.ph,
            NutrientKind::Moisture => self.moisture,
            NutrientKind::ElectricalConductivity => self.ec,
            NutrientKind::Temperature => self.temperature,
        }
    }

    fn with_date(&self, date: NaiveDate) -> Self {
        Self { date, ..self.clone() }
    }
}

/// Baseline and jitter amplitude of the synthetic generator
#[derive(Debug, Clone, Copy)]
pub struct Jitter {
    pub base: f64,
    pub amplitude: f64,
}

impl Jitter {
    const fn new(base: f64, amplitude: f64) -> Self {
        Self { base, amplitude }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.base + rng.gen::<f64>() * self.amplitude
    }
}

/// Generator profile per nutrient kind
pub fn jitter_for(kind: NutrientKind) -> Jitter {
    match kind {
        NutrientKind::Nitrogen => Jitter::new(40.0, 10.0),
        NutrientKind::Phosphorus => Jitter::new(20.0, 8.0),
        NutrientKind::Potassium => Jitter::new(170.0, 20.0),
        NutrientKind::Ph => Jitter::new(6.0, 0.5),
        NutrientKind::Moisture => Jitter::new(70.0, 10.0),
        NutrientKind::ElectricalConductivity => Jitter::new(1.0, 0.3),
        NutrientKind::Temperature => Jitter::new(26.0, 4.0),
    }
}

/// Longest series any source produces, about ten years of days
pub const MAX_TREND_DAYS: usize = 3_660;

/// Source of per-day nutrient history.
///
/// Implementations return points in ascending date order, the last one dated
/// `today`. Requests beyond [`MAX_TREND_DAYS`] are cut to that length, and
/// days before the earliest representable date are skipped.
pub trait TrendSource {
    fn trend(&mut self, days: usize, today: NaiveDate) -> Vec<TrendPoint>;
}

/// Baseline-plus-jitter generator standing in for a historical query
pub struct SyntheticTrend<R> {
    rng: R,
}

impl<R: Rng> SyntheticTrend<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TrendSource for SyntheticTrend<R> {
    fn trend(&mut self, days: usize, today: NaiveDate) -> Vec<TrendPoint> {
        (0..days.min(MAX_TREND_DAYS) as u64)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
            .map(|date| {
                let rng = &mut self.rng;
                TrendPoint {
                    date,
                    nitrogen: jitter_for(NutrientKind::Nitrogen).sample(rng),
                    phosphorus: jitter_for(NutrientKind::Phosphorus).sample(rng),
                    potassium: jitter_for(NutrientKind::Potassium).sample(rng),
                    ph: jitter_for(NutrientKind::Ph).sample(rng),
                    moisture: jitter_for(NutrientKind::Moisture).sample(rng),
                    ec: jitter_for(NutrientKind::ElectricalConductivity).sample(rng),
                    temperature: jitter_for(NutrientKind::Temperature).sample(rng),
                }
            })
            .collect()
    }
}

/// Synthetic trend ending today, from an unseeded generator
pub fn generate_trend(days: usize) -> Vec<TrendPoint> {
    SyntheticTrend::new(rand::thread_rng()).trend(days, Utc::now().date_naive())
}

/// Daily means over stored readings
pub struct ReadingHistory<'a> {
    readings: &'a [SoilReading],
}

impl<'a> ReadingHistory<'a> {
    pub fn new(readings: &'a [SoilReading]) -> Self {
        Self { readings }
    }

    fn daily_means(&self) -> BTreeMap<NaiveDate, TrendPoint> {
        let mut days: BTreeMap<NaiveDate, DailySum> = BTreeMap::new();
        for reading in self.readings {
            days.entry(reading.timestamp.date_naive())
                .or_default()
                .add(reading);
        }
        days.into_iter()
            .map(|(date, sum)| (date, sum.mean(date)))
            .collect()
    }
}

impl TrendSource for ReadingHistory<'_> {
    /// Days without readings carry the previous day's means forward. Days
    /// before any reading are omitted, so the series may be shorter than `days`.
    fn trend(&mut self, days: usize, today: NaiveDate) -> Vec<TrendPoint> {
        let days = days.min(MAX_TREND_DAYS);
        if days == 0 {
            return Vec::new();
        }
        let start = today
            .checked_sub_days(Days::new(days as u64 - 1))
            .unwrap_or(NaiveDate::MIN);
        let means = self.daily_means();
        let mut carried = means.range(..start).next_back().map(|(_, p)| p.clone());

        let mut points = Vec::with_capacity(days);
        for date in start.iter_days().take_while(|date| *date <= today) {
            if let Some(point) = means.get(&date) {
                carried = Some(point.clone());
            }
            if let Some(point) = &carried {
                points.push(point.with_date(date));
            }
        }
        points
    }
}

#[derive(Default)]
struct DailySum {
    count: u32,
    values: [f64; 7],
}

impl DailySum {
    fn add(&mut self, reading: &SoilReading) {
        self.count += 1;
        for (slot, (_, value)) in self.values.iter_mut().zip(reading.values()) {
            *slot += value;
        }
    }

    fn mean(&self, date: NaiveDate) -> TrendPoint {
        let n = f64::from(self.count.max(1));
        let [nitrogen, phosphorus, potassium, ph, moisture, ec, temperature] =
            self.values.map(|v| v / n);
        TrendPoint {
            date,
            nitrogen,
            phosphorus,
            potassium,
            ph,
            moisture,
            ec,
            temperature,
        }
    }
}

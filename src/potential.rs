//! Potential and target revenue calculator
//!
//! Pure numeric transforms over macro parameters and validated site records.
//! All figures are emitted as unrounded floats; display rounding belongs to
//! the rendering layer and happens there exactly once.

use std::collections::HashMap;

use crate::data::SiteRecord;

/// City-level configuration, entirely caller-supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroParams {
    pub two_wheelers: u64,
    pub four_wheelers: u64,
    /// Levy per paying vehicle, in rupiah.
    pub tariff: f64,
    /// Share of parked vehicles that actually pay, in percent [0, 100].
    pub pay_fraction_pct: f64,
    /// Official target as a share of potential, in percent [0, 150].
    pub target_realization_pct: f64,
}

impl Default for MacroParams {
    fn default() -> Self {
        Self {
            two_wheelers: 41_564,
            four_wheelers: 13_369,
            tariff: 2_000.0,
            pay_fraction_pct: 25.0,
            target_realization_pct: 80.0,
        }
    }
}

/// Potential and target figures at one granularity.
///
/// Monthly and yearly are exact linear multiples of daily; there is no
/// calendar-aware day counting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialFigures {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub target_daily: f64,
    pub target_monthly: f64,
    pub target_yearly: f64,
}

impl PotentialFigures {
    pub const ZERO: PotentialFigures = PotentialFigures {
        daily: 0.0,
        monthly: 0.0,
        yearly: 0.0,
        target_daily: 0.0,
        target_monthly: 0.0,
        target_yearly: 0.0,
    };

    /// Derive every figure from a daily potential and the realization share.
    pub fn from_daily(daily: f64, target_realization_pct: f64) -> Self {
        let monthly = daily * 30.0;
        let yearly = daily * 365.0;
        let ratio = target_realization_pct / 100.0;
        Self {
            daily,
            monthly,
            yearly,
            target_daily: daily * ratio,
            target_monthly: monthly * ratio,
            target_yearly: yearly * ratio,
        }
    }

    fn accumulate(&mut self, other: &PotentialFigures) {
        self.daily += other.daily;
        self.monthly += other.monthly;
        self.yearly += other.yearly;
        self.target_daily += other.target_daily;
        self.target_monthly += other.target_monthly;
        self.target_yearly += other.target_yearly;
    }
}

/// City-wide figures computed from macro parameters alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPotential {
    pub total_vehicles: u64,
    pub paying_per_day: f64,
    pub figures: PotentialFigures,
}

/// Figures for a single parking site.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePotential {
    pub site: SiteRecord,
    pub paying_per_day: f64,
    pub figures: PotentialFigures,
}

/// Figures summed over all sites of one (district, subdistrict) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodPotential {
    pub district: String,
    pub subdistrict: String,
    pub avg_parked: f64,
    pub paying_per_day: f64,
    pub figures: PotentialFigures,
}

/// Compute city-wide potential from the macro parameters.
///
/// This requires no ingested data and runs even when no site file was
/// supplied.
pub fn city_potential(params: &MacroParams) -> CityPotential {
    let total_vehicles = params.two_wheelers + params.four_wheelers;
    let paying_per_day = total_vehicles as f64 * params.pay_fraction_pct / 100.0;
    let daily = paying_per_day * params.tariff;
    CityPotential {
        total_vehicles,
        paying_per_day,
        figures: PotentialFigures::from_daily(daily, params.target_realization_pct),
    }
}

/// Compute per-site figures, one output per record, preserving input order.
pub fn site_potentials(sites: &[SiteRecord], params: &MacroParams) -> Vec<SitePotential> {
    sites
        .iter()
        .map(|site| {
            let paying_per_day = site.avg_parked * params.pay_fraction_pct / 100.0;
            let daily = paying_per_day * params.tariff;
            SitePotential {
                site: site.clone(),
                paying_per_day,
                figures: PotentialFigures::from_daily(daily, params.target_realization_pct),
            }
        })
        .collect()
}

/// Group per-site figures by the (district, subdistrict) pair and sum every
/// numeric field. Groups appear in first-seen order, which is deterministic
/// for a fixed input.
///
/// The key is the pair, not the subdistrict alone: subdistrict names repeat
/// across districts.
pub fn neighborhood_potentials(sites: &[SitePotential]) -> Vec<NeighborhoodPotential> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<NeighborhoodPotential> = Vec::new();

    for sp in sites {
        let key = (sp.site.district.clone(), sp.site.subdistrict.clone());
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                groups.push(NeighborhoodPotential {
                    district: key.0.clone(),
                    subdistrict: key.1.clone(),
                    avg_parked: 0.0,
                    paying_per_day: 0.0,
                    figures: PotentialFigures::ZERO,
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.avg_parked += sp.site.avg_parked;
        group.paying_per_day += sp.paying_per_day;
        group.figures.accumulate(&sp.figures);
    }

    groups
}

//! Static building portfolio and its derived aggregates.
//!
//! The sample data is immutable at runtime; the analysis derives counts,
//! averages, and cost totals without mutating the source collection.

use std::collections::BTreeMap;
use std::fmt;

/// U-value above which a building counts as an insulation-upgrade candidate.
pub const UPGRADE_U_VALUE_THRESHOLD: f64 = 0.4;

/// Heating system installed in a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatingSystem {
    /// Electric heat pump.
    HeatPump,
    /// Gas-fired boiler.
    GasBoiler,
}

impl fmt::Display for HeatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeatPump => write!(f, "heat pump"),
            Self::GasBoiler => write!(f, "gas boiler"),
        }
    }
}

/// One managed building.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    /// Display name.
    pub name: String,
    /// Floor area (m²).
    pub area_m2: f64,
    /// Average thermal transmittance (W/m²·K).
    pub u_value: f64,
    /// City the building is in.
    pub city: String,
    /// Installed heating system.
    pub heating_system: HeatingSystem,
    /// Metered monthly consumption (kWh).
    pub monthly_energy_kwh: f64,
}

impl Building {
    fn new(
        name: &str,
        area_m2: f64,
        u_value: f64,
        city: &str,
        heating_system: HeatingSystem,
        monthly_energy_kwh: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            area_m2,
            u_value,
            city: city.to_string(),
            heating_system,
            monthly_energy_kwh,
        }
    }
}

/// Returns the fixed five-building sample portfolio.
pub fn sample_portfolio() -> Vec<Building> {
    vec![
        Building::new("Office Tower A", 1200.0, 0.25, "Dublin", HeatingSystem::HeatPump, 3200.0),
        Building::new("Warehouse B", 2500.0, 0.45, "Cork", HeatingSystem::GasBoiler, 8100.0),
        Building::new(
            "Shopping Center C",
            3200.0,
            0.30,
            "Dublin",
            HeatingSystem::HeatPump,
            12500.0,
        ),
        Building::new("School D", 800.0, 0.35, "Galway", HeatingSystem::GasBoiler, 2800.0),
        Building::new(
            "St. Vincent's Hospital",
            50000.0,
            0.5,
            "Dublin",
            HeatingSystem::GasBoiler,
            50000.0,
        ),
    ]
}

/// Per-building monthly cost line.
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    /// Building name.
    pub name: String,
    /// Monthly consumption (kWh).
    pub energy_kwh: f64,
    /// Monthly cost (EUR).
    pub cost: f64,
}

/// Aggregates derived from a portfolio at a given unit price.
#[derive(Debug, Clone)]
pub struct PortfolioReport {
    /// Number of buildings analyzed.
    pub building_count: usize,
    /// Building counts per city, sorted by city name.
    pub city_counts: BTreeMap<String, usize>,
    /// City with the most buildings (ties broken by name order).
    pub largest_city: Option<(String, usize)>,
    /// Mean U-value across the portfolio.
    pub average_u_value: f64,
    /// Unit price used for the cost lines (EUR per kWh).
    pub price_per_kwh: f64,
    /// One cost line per building, in portfolio order.
    pub cost_lines: Vec<CostLine>,
    /// Total monthly consumption (kWh).
    pub total_energy_kwh: f64,
    /// Total monthly cost (EUR).
    pub total_cost: f64,
    /// Names of buildings heated by gas boilers, with their cities.
    pub gas_boiler_buildings: Vec<(String, String)>,
    /// Buildings with `u_value` above [`UPGRADE_U_VALUE_THRESHOLD`].
    pub upgrade_candidates: Vec<(String, f64)>,
}

impl PortfolioReport {
    /// Analyzes a portfolio without mutating it.
    pub fn analyze(buildings: &[Building], price_per_kwh: f64) -> Self {
        let mut city_counts: BTreeMap<String, usize> = BTreeMap::new();
        for b in buildings {
            *city_counts.entry(b.city.clone()).or_insert(0) += 1;
        }
        let largest_city = city_counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(city, count)| (city.clone(), *count));

        let average_u_value = if buildings.is_empty() {
            0.0
        } else {
            buildings.iter().map(|b| b.u_value).sum::<f64>() / buildings.len() as f64
        };

        let cost_lines: Vec<CostLine> = buildings
            .iter()
            .map(|b| CostLine {
                name: b.name.clone(),
                energy_kwh: b.monthly_energy_kwh,
                cost: b.monthly_energy_kwh * price_per_kwh,
            })
            .collect();
        let total_energy_kwh = cost_lines.iter().map(|l| l.energy_kwh).sum();
        let total_cost = cost_lines.iter().map(|l| l.cost).sum();

        let gas_boiler_buildings = buildings
            .iter()
            .filter(|b| b.heating_system == HeatingSystem::GasBoiler)
            .map(|b| (b.name.clone(), b.city.clone()))
            .collect();

        let upgrade_candidates = buildings
            .iter()
            .filter(|b| b.u_value > UPGRADE_U_VALUE_THRESHOLD)
            .map(|b| (b.name.clone(), b.u_value))
            .collect();

        Self {
            building_count: buildings.len(),
            city_counts,
            largest_city,
            average_u_value,
            price_per_kwh,
            cost_lines,
            total_energy_kwh,
            total_cost,
            gas_boiler_buildings,
            upgrade_candidates,
        }
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Building Portfolio Analysis ===")?;
        writeln!(f, "Managing {} buildings total", self.building_count)?;
        writeln!(f)?;

        writeln!(f, "Buildings by city:")?;
        for (city, count) in &self.city_counts {
            writeln!(f, "  {city}: {count}")?;
        }
        if let Some((city, count)) = &self.largest_city {
            writeln!(f, "Largest presence: {city} ({count} buildings)")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Average U-value: {:.3} W/m²·K",
            self.average_u_value
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "Monthly cost breakdown at EUR {:.2}/kWh:",
            self.price_per_kwh
        )?;
        for line in &self.cost_lines {
            writeln!(
                f,
                "  {}: {:.0} kWh = EUR {:.2}",
                line.name, line.energy_kwh, line.cost
            )?;
        }
        writeln!(
            f,
            "Totals: {:.0} kWh, EUR {:.2}",
            self.total_energy_kwh, self.total_cost
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "Gas boiler buildings ({}):",
            self.gas_boiler_buildings.len()
        )?;
        for (name, city) in &self.gas_boiler_buildings {
            writeln!(f, "  {name} in {city}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Insulation upgrade candidates (U-value > {:.1}):",
            UPGRADE_U_VALUE_THRESHOLD
        )?;
        for (name, u) in &self.upgrade_candidates {
            writeln!(f, "  {name}: {u:.2} W/m²·K")?;
        }
        write!(
            f,
            "Buildings to consider upgrading: {}",
            self.upgrade_candidates.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_five_buildings() {
        assert_eq!(sample_portfolio().len(), 5);
    }

    #[test]
    fn dublin_has_the_largest_presence() {
        let report = PortfolioReport::analyze(&sample_portfolio(), 0.25);
        assert_eq!(report.city_counts.get("Dublin"), Some(&3));
        assert_eq!(report.city_counts.get("Cork"), Some(&1));
        assert_eq!(report.city_counts.get("Galway"), Some(&1));
        assert_eq!(
            report.largest_city,
            Some(("Dublin".to_string(), 3))
        );
    }

    #[test]
    fn average_u_value_matches_hand_computation() {
        let report = PortfolioReport::analyze(&sample_portfolio(), 0.25);
        // (0.25 + 0.45 + 0.30 + 0.35 + 0.5) / 5 = 0.37
        assert!((report.average_u_value - 0.37).abs() < 1e-9);
    }

    #[test]
    fn cost_totals_at_quarter_euro() {
        let report = PortfolioReport::analyze(&sample_portfolio(), 0.25);
        // 3200 + 8100 + 12500 + 2800 + 50000 = 76600 kWh
        assert!((report.total_energy_kwh - 76600.0).abs() < 1e-9);
        assert!((report.total_cost - 19150.0).abs() < 1e-9);
        assert_eq!(report.cost_lines.len(), 5);
        assert!((report.cost_lines[0].cost - 800.0).abs() < 1e-9);
    }

    #[test]
    fn gas_boiler_filter() {
        let report = PortfolioReport::analyze(&sample_portfolio(), 0.25);
        let names: Vec<&str> = report
            .gas_boiler_buildings
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(
            names,
            ["Warehouse B", "School D", "St. Vincent's Hospital"]
        );
    }

    #[test]
    fn upgrade_candidates_above_threshold() {
        let report = PortfolioReport::analyze(&sample_portfolio(), 0.25);
        let names: Vec<&str> = report
            .upgrade_candidates
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, ["Warehouse B", "St. Vincent's Hospital"]);
    }

    #[test]
    fn analysis_does_not_mutate_the_source() {
        let buildings = sample_portfolio();
        let before = buildings.clone();
        let _ = PortfolioReport::analyze(&buildings, 0.25);
        assert_eq!(buildings, before);
    }

    #[test]
    fn empty_portfolio_is_well_behaved() {
        let report = PortfolioReport::analyze(&[], 0.25);
        assert_eq!(report.building_count, 0);
        assert_eq!(report.average_u_value, 0.0);
        assert!(report.largest_city.is_none());
    }
}

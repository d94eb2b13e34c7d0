//! Calculator result types.
//!
//! Each calculator is a pure function of its validated inputs; printing and
//! persistence happen in the menu layer. Inputs are taken as given, with no
//! bounds checking on physical plausibility.

use std::fmt;

use crate::units;

/// Energy cost for a metered consumption at a unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyCost {
    /// Energy used (kWh).
    pub energy_kwh: f64,
    /// Unit price (EUR per kWh).
    pub price_per_kwh: f64,
    /// Total cost (EUR).
    pub total_cost: f64,
    /// Energy converted to megajoules.
    pub energy_mj: f64,
}

impl EnergyCost {
    /// Computes cost and the MJ conversion from raw inputs.
    pub fn calculate(energy_kwh: f64, price_per_kwh: f64) -> Self {
        Self {
            energy_kwh,
            price_per_kwh,
            total_cost: energy_kwh * price_per_kwh,
            energy_mj: units::kwh_to_mj(energy_kwh),
        }
    }

    /// One-line summary for the report store.
    pub fn summary(&self) -> String {
        format!(
            "Energy Cost: {:.2} kWh ({:.2} MJ), EUR {:.2}",
            self.energy_kwh, self.energy_mj, self.total_cost
        )
    }
}

impl fmt::Display for EnergyCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Energy used: {:.2} kWh ({:.2} MJ)",
            self.energy_kwh, self.energy_mj
        )?;
        write!(f, "Total energy cost: EUR {:.2}", self.total_cost)
    }
}

/// Steady-state heating load from floor area, U-value, and ΔT.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatingLoad {
    /// Floor area (m²).
    pub area_m2: f64,
    /// Average thermal transmittance (W/m²·K).
    pub u_value: f64,
    /// Inside-outside temperature difference (°C).
    pub delta_t_c: f64,
    /// Heating load (W).
    pub load_w: f64,
}

impl HeatingLoad {
    /// Computes `area * U * dT` in watts.
    pub fn calculate(area_m2: f64, u_value: f64, delta_t_c: f64) -> Self {
        Self {
            area_m2,
            u_value,
            delta_t_c,
            load_w: area_m2 * u_value * delta_t_c,
        }
    }

    /// Heating load in kilowatts.
    pub fn load_kw(&self) -> f64 {
        self.load_w / 1000.0
    }

    /// The temperature difference expressed in Fahrenheit.
    pub fn delta_t_f(&self) -> f64 {
        units::celsius_to_fahrenheit(self.delta_t_c)
    }

    /// One-line summary for the report store.
    pub fn summary(&self) -> String {
        format!(
            "Heating Load: Area {:.2} m2, dT {:.2} C, {:.2} kW",
            self.area_m2,
            self.delta_t_c,
            self.load_kw()
        )
    }
}

impl fmt::Display for HeatingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ΔT: {:.2} °C ({:.2} °F)",
            self.delta_t_c,
            self.delta_t_f()
        )?;
        write!(f, "Estimated heating load: {:.2} kW", self.load_kw())
    }
}

/// CO₂ emissions for a metered consumption at a grid emission factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Co2Emissions {
    /// Energy used (kWh).
    pub energy_kwh: f64,
    /// Emission factor (kg CO₂ per kWh).
    pub factor_kg_per_kwh: f64,
    /// Estimated emissions (kg CO₂).
    pub emissions_kg: f64,
}

impl Co2Emissions {
    /// Computes `kwh * factor` in kilograms of CO₂.
    pub fn calculate(energy_kwh: f64, factor_kg_per_kwh: f64) -> Self {
        Self {
            energy_kwh,
            factor_kg_per_kwh,
            emissions_kg: energy_kwh * factor_kg_per_kwh,
        }
    }

    /// One-line summary for the report store.
    pub fn summary(&self) -> String {
        format!(
            "CO2: {:.2} kWh ({:.2} MJ), {:.2} kg",
            self.energy_kwh,
            units::kwh_to_mj(self.energy_kwh),
            self.emissions_kg
        )
    }
}

impl fmt::Display for Co2Emissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Energy: {:.2} kWh ({:.2} MJ)",
            self.energy_kwh,
            units::kwh_to_mj(self.energy_kwh)
        )?;
        write!(f, "Estimated CO₂ emissions: {:.2} kg", self.emissions_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_cost_fixture() {
        let r = EnergyCost::calculate(10.0, 0.25);
        assert_eq!(r.total_cost, 2.50);
        assert_eq!(r.energy_mj, 36.0);
    }

    #[test]
    fn heating_load_fixture() {
        let r = HeatingLoad::calculate(100.0, 0.3, 20.0);
        assert!((r.load_w - 600.0).abs() < 1e-9);
        assert!((r.load_kw() - 0.6).abs() < 1e-9);
        assert_eq!(r.delta_t_f(), 68.0);
    }

    #[test]
    fn co2_fixture() {
        let r = Co2Emissions::calculate(10.0, 0.233);
        assert!((r.emissions_kg - 2.33).abs() < 1e-9);
    }

    #[test]
    fn negative_inputs_accepted_silently() {
        // No physical-plausibility bounds on inputs.
        let r = HeatingLoad::calculate(-100.0, 0.3, -20.0);
        assert!((r.load_w - 600.0).abs() < 1e-9);
        let c = EnergyCost::calculate(-10.0, 0.25);
        assert_eq!(c.total_cost, -2.5);
    }

    #[test]
    fn summaries_carry_two_decimal_values() {
        let r = EnergyCost::calculate(10.0, 0.25);
        assert_eq!(r.summary(), "Energy Cost: 10.00 kWh (36.00 MJ), EUR 2.50");
        let h = HeatingLoad::calculate(100.0, 0.3, 20.0);
        assert_eq!(h.summary(), "Heating Load: Area 100.00 m2, dT 20.00 C, 0.60 kW");
        let e = Co2Emissions::calculate(10.0, 0.233);
        assert_eq!(e.summary(), "CO2: 10.00 kWh (36.00 MJ), 2.33 kg");
    }
}

use crate::errors::{check_same_index, TimeIndexMismatchError};

/// An energy need in kWh for each timestep of the shared time index.
///
/// Demand is independent of the technology that meets it - it is what the building needs before
/// any conversion efficiency or fuel is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Demand {
    profile_kwh: Vec<f64>,
}

impl Demand {
    pub fn new(profile_kwh: Vec<f64>) -> Self {
        Self { profile_kwh }
    }

    /// A demand with the same value in every timestep.
    pub fn flat(kwh_per_timestep: f64, timesteps: usize) -> Self {
        Self::new(vec![kwh_per_timestep; timesteps])
    }

    pub fn profile_kwh(&self) -> &[f64] {
        &self.profile_kwh
    }

    pub fn timesteps(&self) -> usize {
        self.profile_kwh.len()
    }

    pub fn annual_sum(&self) -> f64 {
        self.profile_kwh.iter().sum()
    }

    /// Pointwise sum of two demands on the same time index.
    pub fn add(&self, other: &Demand) -> Result<Demand, TimeIndexMismatchError> {
        check_same_index(self.timesteps(), other.timesteps())?;

        Ok(Self::new(
            self.profile_kwh
                .iter()
                .zip(other.profile_kwh.iter())
                .map(|(a, b)| a + b)
                .collect(),
        ))
    }

    pub fn scale(&self, factor: f64) -> Demand {
        Self::new(self.profile_kwh.iter().map(|d| d * factor).collect())
    }

    /// Rescale the whole profile so that it sums to the given annual total, keeping its shape.
    ///
    /// A profile with no demand at all has no shape to keep, so a positive total is spread evenly
    /// across the timesteps.
    pub fn rescale_to(&self, annual_total_kwh: f64) -> Demand {
        let current_total = self.annual_sum();
        match (current_total, annual_total_kwh) {
            (_, target) if target == 0. => Self::flat(0., self.timesteps()),
            (current, target) if current == 0. => {
                if self.timesteps() == 0 {
                    return self.clone();
                }
                Self::flat(target / self.timesteps() as f64, self.timesteps())
            }
            (current, target) => self.scale(target / current),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.profile_kwh.iter().all(|d| *d == 0.)
    }

    pub(crate) fn peak(&self) -> Option<f64> {
        self.profile_kwh.iter().copied().reduce(f64::max)
    }

    /// Sum a number of demands on the same time index.
    pub fn sum<'a>(
        demands: impl IntoIterator<Item = &'a Demand>,
    ) -> Option<Result<Demand, TimeIndexMismatchError>> {
        demands
            .into_iter()
            .map(|d| Ok(d.clone()))
            .reduce(|acc: Result<Demand, TimeIndexMismatchError>, next| {
                acc?.add(&next?)
            })
    }

    pub(crate) fn describe(&self) -> String {
        format!(
            "{:.0} kWh over {} timesteps (peak {:.3} kWh)",
            self.annual_sum(),
            self.timesteps(),
            self.peak().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn demand() -> Demand {
        Demand::new(vec![1., 2., 0., 4., 3.])
    }

    #[rstest]
    fn should_sum_profile(demand: Demand) {
        assert_eq!(demand.annual_sum(), 10.);
    }

    #[rstest]
    fn should_add_pointwise(demand: Demand) {
        let other = Demand::new(vec![0.5, 0.5, 0.5, 0.5, 0.5]);
        assert_eq!(
            demand.add(&other).unwrap().profile_kwh(),
            [1.5, 2.5, 0.5, 4.5, 3.5]
        );
    }

    #[rstest]
    fn should_refuse_to_add_different_indexes(demand: Demand) {
        assert_eq!(
            demand.add(&Demand::flat(1., 3)).unwrap_err(),
            TimeIndexMismatchError::new(5, 3)
        );
    }

    #[rstest]
    fn should_rescale_preserving_shape(demand: Demand) {
        let rescaled = demand.rescale_to(25.);

        assert_relative_eq!(rescaled.annual_sum(), 25.);
        for (i, j) in [(0, 1), (3, 4), (1, 3), (2, 4)] {
            assert_relative_eq!(
                rescaled.profile_kwh()[i] / rescaled.profile_kwh()[j],
                demand.profile_kwh()[i] / demand.profile_kwh()[j]
            );
        }
    }

    #[rstest]
    fn should_rescale_to_zero(demand: Demand) {
        let rescaled = demand.rescale_to(0.);
        assert!(rescaled.is_zero());
        assert_eq!(rescaled.timesteps(), 5);
    }

    #[rstest]
    fn should_spread_total_over_empty_profile() {
        let rescaled = Demand::flat(0., 4).rescale_to(10.);
        assert_eq!(rescaled.profile_kwh(), [2.5, 2.5, 2.5, 2.5]);
    }

    #[rstest]
    fn should_scale_uniformly(demand: Demand) {
        assert_eq!(demand.scale(2.).profile_kwh(), [2., 4., 0., 8., 6.]);
    }

    #[rstest]
    fn should_sum_many_demands(demand: Demand) {
        let total = Demand::sum([&demand, &demand, &demand]).unwrap().unwrap();
        assert_eq!(total.annual_sum(), 30.);
        assert!(Demand::sum([]).is_none());
    }
}

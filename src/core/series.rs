//! Per-parameter series: the measurements pivoted into one chart each.

use crate::prelude::*;
use std::collections::HashMap;

/// One point of a parameter series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterMeasurement {
    pub timestamp: DateTime<Utc>,
    pub parameter: Parameter,
    pub value: f64,
}

/// Projects the measurements onto the parameter, most recent first.
///
/// Absent measurements give an empty series. Measurements with equal timestamps
/// keep their storage order.
pub fn param_series(measurements: Option<&[Measurement]>, parameter: Parameter) -> Vec<ParameterMeasurement> {
    let mut series: Vec<ParameterMeasurement> = measurements
        .unwrap_or_default()
        .iter()
        .map(|measurement| ParameterMeasurement {
            timestamp: measurement.timestamp,
            parameter,
            value: measurement.get(parameter),
        })
        .collect();
    series.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    series
}

/// Same as [`param_series`] but takes a parameter key such as `pH`.
pub fn param_series_by_key(measurements: Option<&[Measurement]>, key: &str) -> Result<Vec<ParameterMeasurement>> {
    Ok(param_series(measurements, key.parse()?))
}

/// Memoizes the series per parameter for one measurement vector.
///
/// Measurements are replaced wholesale, never mutated, so the `Arc` identity
/// tells whether the cached series are still valid.
#[derive(Default, Debug)]
pub struct SeriesCache {
    source: Option<Arc<Vec<Measurement>>>,
    series: HashMap<Parameter, Arc<Vec<ParameterMeasurement>>>,
}

impl SeriesCache {
    pub fn get(
        &mut self,
        measurements: Option<&Arc<Vec<Measurement>>>,
        parameter: Parameter,
    ) -> Arc<Vec<ParameterMeasurement>> {
        let is_same_source = match (&self.source, measurements) {
            (Some(cached), Some(measurements)) => Arc::ptr_eq(cached, measurements),
            (None, None) => true,
            _ => false,
        };
        if !is_same_source {
            self.series.clear();
            self.source = measurements.cloned();
        }
        self.series
            .entry(parameter)
            .or_insert_with(|| Arc::new(param_series(measurements.map(|m| m.as_slice()), parameter)))
            .clone()
    }

    /// Number of memoized series.
    pub fn len(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn fjord_a() -> Vec<Measurement> {
        vec![
            Measurement {
                timestamp: at("2024-01-01T00:00:00Z"),
                ph: 7.1,
                turbidity: 2.0,
                temperature: 10.0,
                conductivity: 300.0,
            },
            Measurement {
                timestamp: at("2024-01-02T00:00:00Z"),
                ph: 7.3,
                turbidity: 1.0,
                temperature: 11.0,
                conductivity: 310.0,
            },
        ]
    }

    #[test]
    fn ph_series_most_recent_first() {
        assert_eq!(
            param_series(Some(fjord_a().as_slice()), Parameter::Ph),
            vec![
                ParameterMeasurement {
                    timestamp: at("2024-01-02T00:00:00Z"),
                    parameter: Parameter::Ph,
                    value: 7.3,
                },
                ParameterMeasurement {
                    timestamp: at("2024-01-01T00:00:00Z"),
                    parameter: Parameter::Ph,
                    value: 7.1,
                },
            ]
        );
    }

    #[test]
    fn absent_measurements_give_empty_series() {
        assert!(param_series(None, Parameter::Temperature).is_empty());
        assert!(param_series(Some(&[][..]), Parameter::Temperature).is_empty());
    }

    #[test]
    fn series_is_sorted_and_complete() {
        let measurements: Vec<Measurement> = [5, 1, 4, 2, 3, 3]
            .iter()
            .enumerate()
            .map(|(i, day)| Measurement {
                timestamp: Utc.with_ymd_and_hms(2021, 1, *day, 13, 0, 0).unwrap(),
                ph: 7.0,
                turbidity: i as f64,
                temperature: 5.0,
                conductivity: 500.0,
            })
            .collect();
        let series = param_series(Some(measurements.as_slice()), Parameter::Turbidity);

        assert_eq!(series.len(), measurements.len());
        assert!(series.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
        for point in series.iter() {
            assert!(measurements
                .iter()
                .any(|m| m.timestamp == point.timestamp && m.turbidity == point.value));
        }
    }

    #[test]
    fn equal_timestamps_keep_storage_order() {
        let mut measurements = fjord_a();
        measurements[1].timestamp = measurements[0].timestamp;
        let values: Vec<f64> = param_series(Some(measurements.as_slice()), Parameter::Ph)
            .into_iter()
            .map(|point| point.value)
            .collect();
        assert_eq!(values, vec![7.1, 7.3]);
    }

    #[test]
    fn by_key() -> Result {
        let series = param_series_by_key(Some(fjord_a().as_slice()), "conductivity")?;
        assert_eq!(series[0].value, 310.0);
        assert!(param_series_by_key(Some(fjord_a().as_slice()), "salinity").is_err());
        Ok(())
    }

    #[test]
    fn cache_reuses_series_for_same_measurements() {
        let measurements = Arc::new(fjord_a());
        let mut cache = SeriesCache::default();
        let first = cache.get(Some(&measurements), Parameter::Ph);
        let second = cache.get(Some(&measurements), Parameter::Ph);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_invalidates_on_new_measurements() {
        let mut cache = SeriesCache::default();
        let old = cache.get(Some(&Arc::new(fjord_a())), Parameter::Ph);
        cache.get(Some(&Arc::new(fjord_a())), Parameter::Turbidity);
        assert_eq!(cache.len(), 1);

        let new = cache.get(Some(&Arc::new(Vec::new())), Parameter::Ph);
        assert_eq!(old.len(), 2);
        assert!(new.is_empty());
    }

    #[test]
    fn cache_without_measurements() {
        let mut cache = SeriesCache::default();
        assert!(cache.get(None, Parameter::Ph).is_empty());
    }
}

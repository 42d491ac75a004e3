//! Per-trip stop timetables.

use super::time::{StopTime, TimeError};

/// Error building a timetable from upstream text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// A stop's time was not "HHhMM"
    #[error("stop {stop:?}: {source}")]
    BadTime {
        stop: String,
        #[source]
        source: TimeError,
    },

    /// A stop with an empty name
    #[error("timetable contains an empty stop name")]
    EmptyStopName,
}

/// One trip's full itinerary: stop name → time, in travel order.
///
/// # Examples
///
/// ```
/// use bus_server::domain::StopTimetable;
///
/// let tt = StopTimetable::from_pairs([
///     ("Ponta Garça", "06h40"),
///     ("Caminho Novo", "06h45"),
///     ("Vila Franca", "07h05"),
/// ]).unwrap();
///
/// assert_eq!(tt.position("Vila Franca"), Some(2));
/// assert_eq!(tt.time_at("Caminho Novo").unwrap().to_string(), "06h45");
/// assert!(!tt.contains("Povoação"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopTimetable {
    entries: Vec<(String, StopTime)>,
}

impl StopTimetable {
    /// Build from (stop, "HHhMM") pairs in travel order.
    ///
    /// A stop repeated later in the input keeps its first position and
    /// takes the later time, matching how a keyed map would read it.
    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut entries: Vec<(String, StopTime)> = Vec::new();

        for (stop, time) in pairs {
            let stop = stop.into();
            if stop.trim().is_empty() {
                return Err(TimetableError::EmptyStopName);
            }
            let time = StopTime::parse(time.as_ref()).map_err(|source| {
                TimetableError::BadTime {
                    stop: stop.clone(),
                    source,
                }
            })?;

            match entries.iter_mut().find(|(name, _)| *name == stop) {
                Some(existing) => existing.1 = time,
                None => entries.push((stop, time)),
            }
        }

        Ok(Self { entries })
    }

    /// Index of a stop in travel order.
    pub fn position(&self, stop: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == stop)
    }

    pub fn contains(&self, stop: &str) -> bool {
        self.position(stop).is_some()
    }

    /// Scheduled time at a stop.
    pub fn time_at(&self, stop: &str) -> Option<StopTime> {
        self.entries
            .iter()
            .find(|(name, _)| name == stop)
            .map(|(_, time)| *time)
    }

    /// The stops from `origin` through `destination`, inclusive.
    ///
    /// Returns `None` unless both are present with `origin` first.
    pub fn leg(&self, origin: &str, destination: &str) -> Option<&[(String, StopTime)]> {
        let from = self.position(origin)?;
        let to = self.position(destination)?;
        (from <= to).then(|| &self.entries[from..=to])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StopTime)> {
        self.entries.iter().map(|(name, time)| (name.as_str(), *time))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

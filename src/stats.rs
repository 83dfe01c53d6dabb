//! Per-generation fitness statistics and the logbook that collects them.

use indexmap::IndexMap;
use serde::Serialize;

/// Summary of one fitness column
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub avg: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    /// `None` for an empty column
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let avg = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            avg,
            std: variance.sqrt(),
            min,
            max,
        })
    }
}

/// One logbook row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogbookRecord {
    #[serde(rename = "gen")]
    pub generation: u32,
    pub evals: usize,
    /// Statistic columns in header order
    #[serde(flatten)]
    pub fields: IndexMap<String, f64>,
}

/// Generation-by-generation statistics table
///
/// Columns are `gen`, `evals`, then `avg std min max` per objective. With more than one
/// objective the statistic names carry the objective number (`avg1`, `min2`, ...).
#[derive(Clone, Debug)]
pub struct Logbook {
    header: Vec<String>,
    records: Vec<LogbookRecord>,
    streamed: usize,
    header_streamed: bool,
}

const STAT_NAMES: [&str; 4] = ["avg", "std", "min", "max"];

impl Logbook {
    pub fn new(objectives: usize) -> Self {
        let mut header = vec!["gen".to_string(), "evals".to_string()];
        for k in 0..objectives {
            for name in STAT_NAMES {
                header.push(column_name(name, k, objectives));
            }
        }

        Self {
            header,
            records: Vec::new(),
            streamed: 0,
            header_streamed: false,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[LogbookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a row; `stats` holds one entry per objective
    pub fn record(&mut self, generation: u32, evals: usize, stats: &[Statistics]) {
        let mut fields = IndexMap::new();
        for (k, s) in stats.iter().enumerate() {
            let values = [s.avg, s.std, s.min, s.max];
            for (name, value) in STAT_NAMES.iter().zip(values) {
                fields.insert(column_name(name, k, stats.len()), value);
            }
        }

        self.records.push(LogbookRecord {
            generation,
            evals,
            fields,
        });
    }

    /// Tab-separated lines not streamed yet, header first on the first call
    pub fn stream(&mut self) -> String {
        let mut lines = Vec::new();
        if !self.header_streamed {
            lines.push(self.header.join("\t"));
            self.header_streamed = true;
        }

        for record in &self.records[self.streamed..] {
            let mut cells = vec![record.generation.to_string(), record.evals.to_string()];
            cells.extend(self.header[2..].iter().map(|column| {
                record
                    .fields
                    .get(column)
                    .map(|v| format!("{:.6}", v))
                    .unwrap_or_default()
            }));
            lines.push(cells.join("\t"));
        }
        self.streamed = self.records.len();

        lines.join("\n")
    }

    /// All records as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

fn column_name(stat: &str, objective: usize, objectives: usize) -> String {
    if objectives > 1 {
        format!("{}{}", stat, objective + 1)
    } else {
        stat.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_use_population_deviation() {
        let stats = Statistics::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.avg, 5.0);
        assert_eq!(stats.std, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!(Statistics::compute(&[]).is_none());
    }

    #[test]
    fn headers_follow_objective_count() {
        assert_eq!(Logbook::new(1).header(), &["gen", "evals", "avg", "std", "min", "max"]);
        let multi = Logbook::new(2);
        assert_eq!(multi.header()[2], "avg1");
        assert_eq!(multi.header()[9], "max2");
        assert_eq!(multi.header().len(), 10);
    }

    #[test]
    fn stream_emits_each_row_once() {
        let mut logbook = Logbook::new(1);
        let stats = Statistics::compute(&[1.0, 3.0]).unwrap();
        logbook.record(0, 2, &[stats]);

        let first = logbook.stream();
        assert_eq!(
            first,
            "gen\tevals\tavg\tstd\tmin\tmax\n0\t2\t2.000000\t1.000000\t1.000000\t3.000000"
        );
        assert_eq!(logbook.stream(), "");

        logbook.record(1, 2, &[stats]);
        assert!(logbook.stream().starts_with("1\t2\t"));
    }

    #[test]
    fn json_keeps_column_order() {
        let mut logbook = Logbook::new(2);
        let a = Statistics::compute(&[1.0]).unwrap();
        let b = Statistics::compute(&[2.0]).unwrap();
        logbook.record(3, 25, &[a, b]);

        let json = logbook.to_json().unwrap();
        let gen_at = json.find("\"gen\"").unwrap();
        let avg1_at = json.find("\"avg1\"").unwrap();
        let max2_at = json.find("\"max2\"").unwrap();
        assert!(gen_at < avg1_at && avg1_at < max2_at);

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["evals"], 25);
        assert_eq!(parsed[0]["min2"], 2.0);
    }
}

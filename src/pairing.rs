/// Pairing of gpu-burn logs with stress-ng logs
///
/// The two tools are submitted as separate jobs on the same node at about the
/// same time. They don't share a job id, but both schedulers hand out
/// increasing ids, so on a given host the closest pair of ids is taken to be
/// the same test run.
///
/// Matching is one-shot: each gpu-burn log nominates its closest stress-ng
/// log, and when several nominate the same one only the closest nomination
/// survives. Losing nominations are not retried against a runner-up.
use crate::filename::parse_log_name;
use log::{debug, warn};
use std::collections::HashMap;

/// The pairing result for one stress-ng log
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pairing {
    pub primary: String,
    /// Matched gpu-burn log, None when nothing nominated this log or all nominations lost
    pub secondary: Option<String>,
    /// Job id distance of the match
    pub distance: Option<u64>,
}

/// Output of [`pair_logs`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingOutcome {
    /// One entry per stress-ng log, in input order
    pub pairs: Vec<Pairing>,
    /// gpu-burn logs that ended up without a stress-ng log, in input order
    pub unmatched: Vec<String>,
}

impl PairingOutcome {
    /// The gpu-burn log paired with `primary`, if any
    pub fn secondary_for(&self, primary: &str) -> Option<&str> {
        self.pairs.iter().find(|p| p.primary == primary).and_then(|p| p.secondary.as_deref())
    }
}

/// A gpu-burn log's bid for a stress-ng log
struct Nomination<'a> {
    secondary: &'a str,
    distance: u64,
}

/// Pair every primary (stress-ng) log with at most one secondary (gpu-burn) log.
///
/// Filenames that don't parse as `<job_id>_<host>...` take no part in matching.
/// Ties on distance go to the first candidate encountered, so callers wanting
/// a reproducible result should pass filenames in a stable order.
pub fn pair_logs<P, S>(primaries: &[P], secondaries: &[S]) -> PairingOutcome
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    // host -> [(job_id, filename)]
    let mut by_host: HashMap<String, Vec<(u64, &str)>> = HashMap::new();
    for primary in primaries {
        let primary = primary.as_ref();
        match parse_log_name(primary) {
            Some(name) => by_host.entry(name.host).or_default().push((name.job_id, primary)),
            None => warn!("Ignoring stress-ng log with unparseable name: {}", primary),
        }
    }

    // primary filename -> winning nomination
    let mut winners: HashMap<&str, Nomination> = HashMap::new();
    for secondary in secondaries {
        let secondary = secondary.as_ref();
        let Some(name) = parse_log_name(secondary) else {
            warn!("Ignoring gpu-burn log with unparseable name: {}", secondary);
            continue;
        };
        let Some(candidates) = by_host.get(&name.host) else {
            debug!("No stress-ng log on host {} for {}", name.host, secondary);
            continue;
        };

        let mut closest: Option<(&str, u64)> = None;
        for &(job_id, primary) in candidates {
            let distance = job_id.abs_diff(name.job_id);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((primary, distance));
            }
        }
        let Some((primary, distance)) = closest else {
            continue;
        };

        match winners.get(primary) {
            Some(current) if current.distance <= distance => {
                debug!(
                    "{} loses {} to {} (distance {} vs {})",
                    secondary, primary, current.secondary, distance, current.distance
                );
            }
            _ => {
                winners.insert(primary, Nomination { secondary, distance });
            }
        }
    }

    let pairs: Vec<Pairing> = primaries
        .iter()
        .map(|p| {
            let primary = p.as_ref();
            let winner = winners.get(primary);
            Pairing {
                primary: primary.to_string(),
                secondary: winner.map(|w| w.secondary.to_string()),
                distance: winner.map(|w| w.distance),
            }
        })
        .collect();

    let unmatched = secondaries
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !winners.values().any(|w| w.secondary == *s))
        .map(str::to_string)
        .collect();

    PairingOutcome { pairs, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_job_id_on_same_host() {
        let outcome = pair_logs(
            &["100_hostA.out", "500_hostB.out"],
            &["101_hostA_x.txt", "600_hostB_x.txt", "900_hostA_x.txt"],
        );

        assert_eq!(outcome.secondary_for("100_hostA.out"), Some("101_hostA_x.txt"));
        assert_eq!(outcome.secondary_for("500_hostB.out"), Some("600_hostB_x.txt"));
        assert_eq!(outcome.pairs[0].distance, Some(1));
        assert_eq!(outcome.pairs[1].distance, Some(100));
        assert_eq!(outcome.unmatched, vec!["900_hostA_x.txt".to_string()]);
    }

    #[test]
    fn test_one_result_per_primary_in_input_order() {
        let outcome = pair_logs(&["500_hostB.out", "100_hostA.out", "300_hostC.out"], &["101_hostA_x.txt"]);
        let primaries: Vec<&str> = outcome.pairs.iter().map(|p| p.primary.as_str()).collect();
        assert_eq!(primaries, vec!["500_hostB.out", "100_hostA.out", "300_hostC.out"]);
        assert_eq!(outcome.pairs[0].secondary, None);
        assert_eq!(outcome.pairs[2].secondary, None);
    }

    #[test]
    fn test_competing_nominations_no_reassignment() {
        // Both gpu-burn logs are closest to 100; 200 stays unmatched even though
        // the losing log would have been a reasonable match for it.
        let outcome = pair_logs(&["100_hostA.out", "200_hostA.out"], &["110_hostA_x.txt", "140_hostA_x.txt"]);

        assert_eq!(outcome.secondary_for("100_hostA.out"), Some("110_hostA_x.txt"));
        assert_eq!(outcome.secondary_for("200_hostA.out"), None);
        assert_eq!(outcome.unmatched, vec!["140_hostA_x.txt".to_string()]);
    }

    #[test]
    fn test_later_closer_nomination_wins() {
        let outcome = pair_logs(&["100_hostA.out"], &["130_hostA_x.txt", "102_hostA_x.txt"]);
        assert_eq!(outcome.secondary_for("100_hostA.out"), Some("102_hostA_x.txt"));
        assert_eq!(outcome.unmatched, vec!["130_hostA_x.txt".to_string()]);
    }

    #[test]
    fn test_distance_ties_keep_first_encounter() {
        // Equidistant primaries: the first in input order is nominated
        let outcome = pair_logs(&["90_hostA.out", "110_hostA.out"], &["100_hostA_x.txt"]);
        assert_eq!(outcome.secondary_for("90_hostA.out"), Some("100_hostA_x.txt"));

        // Equidistant nominations: the first nomination is kept
        let outcome = pair_logs(&["100_hostA.out"], &["95_hostA_x.txt", "105_hostA_x.txt"]);
        assert_eq!(outcome.secondary_for("100_hostA.out"), Some("95_hostA_x.txt"));
    }

    #[test]
    fn test_hosts_never_cross() {
        let outcome = pair_logs(&["100_hostA.out"], &["100_hostB_x.txt"]);
        assert_eq!(outcome.secondary_for("100_hostA.out"), None);
        assert_eq!(outcome.unmatched, vec!["100_hostB_x.txt".to_string()]);
    }

    #[test]
    fn test_unparseable_names_are_skipped() {
        let outcome = pair_logs(&["slurm-1.out", "100_hostA.out"], &["gpu-burn.txt", "101_hostA_x.txt"]);
        assert_eq!(outcome.pairs.len(), 2);
        assert_eq!(outcome.secondary_for("slurm-1.out"), None);
        assert_eq!(outcome.secondary_for("100_hostA.out"), Some("101_hostA_x.txt"));
        assert_eq!(outcome.unmatched, vec!["gpu-burn.txt".to_string()]);
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        let outcome = pair_logs(&none, &none);
        assert!(outcome.pairs.is_empty());
        assert!(outcome.unmatched.is_empty());

        let outcome = pair_logs(&["100_hostA.out"], &none);
        assert_eq!(outcome.pairs[0].secondary, None);
    }

    #[test]
    fn test_repeatable() {
        let primaries = ["100_hostA.out", "200_hostA.out", "500_hostB.out"];
        let secondaries = ["150_hostA_x.txt", "199_hostA_x.txt", "498_hostB_x.txt"];
        assert_eq!(pair_logs(&primaries, &secondaries), pair_logs(&primaries, &secondaries));
    }
}

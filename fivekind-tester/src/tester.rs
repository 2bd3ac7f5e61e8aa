use colored::Colorize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenarios::Scenario;
use crate::simulation::GameSimulator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    simulator: GameSimulator,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(simulator: GameSimulator, verbose: bool) -> Self {
        Self { simulator, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seats: {} seed: {})",
                        scenario.key.bright_white(),
                        self.simulator.seats(),
                        seed
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(&self, scenario: &Scenario, seed: u64, iterations: usize) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let start_time = Instant::now();

            match (scenario.run)(&self.simulator, iteration_seed) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    debug!("{} seed {iteration_seed} passed in {duration:?}", scenario.key);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{} passed ({duration:?})", i + 1, iterations);
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1);
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::get_scenario;
    use anyhow::bail;
    use fivekind_game::GameConfig;

    fn tester() -> LogicTester {
        LogicTester::new(GameSimulator::new(2, GameConfig::default()), false)
    }

    #[test]
    fn passing_scenario_counts_every_iteration() {
        let scenario = get_scenario("smoke").unwrap();
        let results = tester().run_scenario(&scenario, &[7, 8], 3);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.passed);
            assert_eq!(result.iterations_run, 3);
            assert_eq!(result.successful_iterations, 3);
        }
        assert_eq!(results[1].seed, 8);
    }

    #[test]
    fn failures_carry_the_iteration_seed() {
        let scenario = Scenario {
            key: "always-fails",
            description: "test only",
            run: |_, seed| bail!("boom at {seed}"),
        };
        let result = &tester().run_scenario(&scenario, &[100], 2)[0];
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.average_duration, Duration::ZERO);
        assert_eq!(result.failures[1], "Iteration 2 (seed 101): boom at 101");
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = ScenarioResult {
            scenario_name: "smoke".to_string(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 12);
    }
}

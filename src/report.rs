use std::fmt::Write;

use crate::{
    runner::{CoverResult, RunOutcome},
    Vertex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `NAME: v1,v2,...` per algorithm, vertices ascending.
    Human,
    /// One `t1,t2,t3` line of CPU seconds.
    Benchmark { precision: usize },
}

pub fn format_outcome(outcome: &RunOutcome, mode: Mode) -> String {
    let mut output = String::new();
    match mode {
        Mode::Human => {
            for (algorithm, result) in outcome.iter() {
                let _ = write!(&mut output, "{algorithm}: ");
                match result.cover() {
                    Some(cover) => output.push_str(&join(&cover.sorted())),
                    None => output.push_str("timeout"),
                }
                output.push('\n');
            }
        }
        Mode::Benchmark { precision } => {
            let times: Vec<String> = outcome
                .results()
                .iter()
                .map(|result| match result {
                    CoverResult::Completed { elapsed, .. } => {
                        format!("{:.*}", precision, elapsed.as_secs_f64())
                    }
                    CoverResult::TimedOut => "timeout".to_string(),
                })
                .collect();
            let _ = writeln!(&mut output, "{}", times.join(","));
        }
    }
    output
}

pub fn format_path(path: &[Vertex]) -> String {
    path.iter()
        .map(Vertex::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

fn join(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(Vertex::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        runner::{run_with, Algorithm, CoverSolver, RunnerConfig},
        cancel::CancelToken,
        Cover, Graph,
    };
    use std::time::Duration;

    struct Fixed(Option<Vec<Vertex>>);

    impl CoverSolver for Fixed {
        fn solve(&self, _graph: &Graph, cancel: &CancelToken) -> Option<Cover> {
            match &self.0 {
                Some(vertices) => Some(Cover::from(vertices.clone())),
                None => {
                    while !cancel.is_cancelled() {
                        std::thread::sleep(Duration::from_millis(1));
                    }
                    None
                }
            }
        }
    }

    fn outcome() -> RunOutcome {
        let mut graph = Graph::new(4).unwrap();
        graph.set_edges([(0, 3), (1, 3), (2, 3)]);
        let config = RunnerConfig {
            timeout: Duration::from_millis(50),
        };
        run_with(
            &graph,
            &config,
            [
                &Fixed(Some(vec![3])),
                &Fixed(Some(vec![3, 2, 0, 1])),
                &Fixed(None),
            ],
        )
    }

    #[test]
    fn test_human() {
        let text = format_outcome(&outcome(), Mode::Human);
        assert_eq!(
            text,
            "CNF-SAT-VC: 3\nAPPROX-VC-1: 0,1,2,3\nAPPROX-VC-2: timeout\n"
        );
    }

    #[test]
    fn test_benchmark() {
        let outcome = outcome();
        let text = format_outcome(&outcome, Mode::Benchmark { precision: 2 });
        let fields: Vec<&str> = text.trim_end().split(',').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2], "timeout");
        let first: f64 = fields[0].parse().unwrap();
        assert!(first >= 0.0);
        assert_eq!(fields[0].split('.').nth(1).unwrap().len(), 2);
        assert!(outcome.get(Algorithm::CnfSat).elapsed().is_some());
    }

    #[test]
    fn test_path() {
        assert_eq!(format_path(&[4, 0, 2]), "4-0-2");
        assert_eq!(format_path(&[1]), "1");
    }
}

//! 燃料、输出顺序与名字解析

use super::{block, reduced, run};
use crate::block::{compose, quote, Block};
use crate::reader::MapResolver;
use crate::vm::{reduce, reduce_config, reduce_with, ReduceConfig, Reducer, DEFAULT_QUOTA};

const OMEGA: &str = "[copy app] copy app";

#[cfg(test)]
mod fuel_tests {
    use super::*;

    #[test]
    fn test_zero_quota_returns_input() {
        let outcome = Reducer::new(block("[foo] box")).run(0);
        assert_eq!(outcome.block.to_string(), "[foo] box");
        assert_eq!(outcome.stats.fuel_used, 0);
        assert!(outcome.stats.exhausted);
    }

    #[test]
    fn test_empty_program() {
        let outcome = Reducer::new(Block::Id).run(0);
        assert!(outcome.block.is_id());
        assert!(!outcome.stats.exhausted);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_omega_runs_out_of_fuel() {
        let outcome = Reducer::new(block(OMEGA)).run(10);
        assert!(outcome.stats.exhausted);
        assert_eq!(outcome.stats.fuel_used, 10);
        assert!(!outcome.is_complete());
        // stopped right after `app`: `copy app` pending over one `[copy app]`
        assert_eq!(outcome.block.to_string(), "copy app [copy app]");
    }

    #[test]
    fn test_omega_mid_step() {
        let outcome = Reducer::new(block(OMEGA)).run(1);
        assert_eq!(outcome.block.to_string(), "app [copy app] [copy app]");
        assert_eq!(reduce(block(OMEGA), 3).to_string(), "app [copy app] [copy app]");
    }

    #[test]
    fn test_fuel_counts_rewrites_only() {
        let outcome = run("1 2 3 [4] [5 6] swap");
        assert_eq!(outcome.stats.fuel_used, 1);
        assert!(!outcome.stats.exhausted);
    }

    #[test]
    fn test_finished_within_quota_is_not_exhausted() {
        let outcome = Reducer::new(block("[copy] copy")).run(1);
        assert_eq!(outcome.stats.fuel_used, 1);
        assert!(!outcome.stats.exhausted);
    }
}

#[cfg(test)]
mod output_tests {
    use super::*;

    #[test]
    fn test_trash_then_work_then_data() {
        let outcome = Reducer::new(block("1 app 2 [copy] copy drop [drop] app")).run(2);
        // `app` is stuck with `1`, `copy` and `drop` spend the fuel
        assert_eq!(outcome.block.to_string(), "1 app [drop] app 2 [copy]");
        assert_eq!(outcome.stats.stuck, 1);
        assert!(outcome.stats.exhausted);
    }

    #[test]
    fn test_pending_work_comes_before_values() {
        let program = compose([quote(block("app")), block("box [drop] box")]);
        assert_eq!(reduce(program, 1).to_string(), "[drop] box [[app]]");

        let outcome = Reducer::new(block("1 app [foo] box [drop] box")).run(1);
        assert_eq!(outcome.block.to_string(), "1 app [drop] box [[foo]]");
        assert_eq!(outcome.stats.fuel_used, 1);
        assert!(outcome.stats.exhausted);
    }

    #[test]
    fn test_stuck_result_is_stable() {
        let stuck = block("1 app [nocopy] copy 3");
        let once = reduce(stuck.clone(), DEFAULT_QUOTA);
        assert_eq!(once, stuck);
        assert_eq!(reduce(once, DEFAULT_QUOTA), stuck);
    }
}

#[cfg(test)]
mod resolver_tests {
    use super::*;

    fn defs() -> MapResolver {
        let mut defs = MapResolver::new();
        defs.define_text("dup", "copy").unwrap();
        defs.define_text("twice", "dup app").unwrap();
        defs
    }

    #[test]
    fn test_names_resolve_lazily() {
        let defs = defs();
        assert_eq!(reduce_with(block("[foo] dup"), 10, &defs).to_string(), "[foo] [foo]");
        let outcome = Reducer::with_resolver(block("[foo] dup"), &defs).run(10);
        // one unit for the name, one for `copy`
        assert_eq!(outcome.stats.fuel_used, 2);
    }

    #[test]
    fn test_names_inside_quotes_wait() {
        let defs = defs();
        assert_eq!(reduce_with(block("[dup]"), 10, &defs).to_string(), "[dup]");
        assert_eq!(
            reduce_with(block("[1 box] twice"), 10, &defs).to_string(),
            "[1 box] [1]"
        );
    }

    #[test]
    fn test_unknown_name_is_stuck() {
        let outcome = Reducer::with_resolver(block("1 nothing 2"), &defs()).run(10);
        assert_eq!(outcome.block.to_string(), "1 nothing 2");
        assert_eq!(outcome.stats.stuck, 1);
    }

    #[test]
    fn test_cyclic_name_is_stuck() {
        let mut defs = defs();
        defs.define_text("loop", "copy loop").unwrap();
        let outcome = Reducer::with_resolver(block("1 loop"), &defs).run(10);
        assert_eq!(outcome.block.to_string(), "1 loop");
        assert_eq!(outcome.stats.stuck, 1);
    }

    #[test]
    fn test_reduce_config() {
        let config = ReduceConfig {
            quota: 4,
            trace: true,
        };
        let outcome = reduce_config(block(OMEGA), &config, &defs());
        assert_eq!(outcome.stats.fuel_used, 4);
        assert!(outcome.stats.exhausted);
        assert_eq!(ReduceConfig::default().quota, DEFAULT_QUOTA);
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let plain = Reducer::new(block("[copy] [drop] swap cat")).run(10);
        let traced = Reducer::new(block("[copy] [drop] swap cat"))
            .trace(true)
            .run(10);
        assert_eq!(plain.block, traced.block);
        assert_eq!(plain.stats, traced.stats);
    }

    #[test]
    fn test_debug_shows_sizes() {
        let reducer = Reducer::new(block("1 2"));
        let text = format!("{:?}", reducer);
        assert!(text.starts_with("Reducer"));
        assert_eq!(reduced("1 2"), "1 2");
    }
}

//! A small library of definitions on disk
//!
//! One file per name under a root directory, the way `eval` and the shell
//! find definitions.

use std::fs;

use abc::reader::{read, FileResolver, ReadError, Resolver};
use abc::{eval_text, ReduceConfig};
use tempfile::TempDir;

fn library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let defs = [
        // [B] [A] true = A, [B] [A] false = B
        ("true", "swap drop app"),
        ("false", "drop app"),
        ("dup", "copy"),
        ("dip", "swap box cat app"),
    ];
    for (name, body) in defs {
        fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

#[test]
fn test_booleans() {
    let dir = library();
    let resolver = FileResolver::new(dir.path());
    let config = ReduceConfig::default();

    let outcome = eval_text("[nope] [yeah] true", &config, &resolver).unwrap();
    assert_eq!(outcome.block.to_string(), "yeah");
    let outcome = eval_text("[nope] [yeah] false", &config, &resolver).unwrap();
    assert_eq!(outcome.block.to_string(), "nope");
}

#[test]
fn test_eager_read_matches_lazy_eval() {
    let dir = library();
    let resolver = FileResolver::new(dir.path());
    let config = ReduceConfig::default();

    let eager = read("1 2 [dup] dip", &resolver).unwrap();
    assert_eq!(eager.to_string(), "1 2 [copy] swap box cat app");
    let lazy = eval_text("1 2 [dup] dip", &config, &resolver).unwrap();
    let direct = abc::vm::reduce(eager, config.quota);
    assert_eq!(lazy.block, direct);
    assert_eq!(direct.to_string(), "1 1 2");
}

#[test]
fn test_missing_definition_is_left_stuck() {
    let dir = library();
    let resolver = FileResolver::new(dir.path());
    let outcome = eval_text("1 dup nowhere", &ReduceConfig::default(), &resolver).unwrap();
    assert_eq!(outcome.block.to_string(), "1 1 nowhere");
    assert_eq!(outcome.stats.stuck, 1);
    assert!(matches!(
        resolver.resolve("nowhere"),
        Err(ReadError::Missing { .. })
    ));
}

#[test]
fn test_shared_resolver_across_threads() {
    let dir = library();
    let resolver = FileResolver::new(dir.path());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let block = read("[dup] [dip] true", &resolver);
                assert!(block.is_ok());
            });
        }
    });
}

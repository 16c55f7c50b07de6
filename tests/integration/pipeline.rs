//! Bytecode in, bytecode out
//!
//! Drives the public API the way a host would: decode untrusted bytes,
//! reduce under a quota, encode the result and decode it again.

use abc::codec::{decode_bytes, encode, link_of};
use abc::reader::parse;
use abc::vm::{reduce, reduce_batch};
use abc::{reduce_bytes, Block, ReduceConfig};

fn bytes(text: &str) -> Vec<u8> {
    encode(&parse(text).unwrap()).unwrap()
}

#[test]
fn test_reduce_bytecode() {
    let config = ReduceConfig::default();
    let outcome = reduce_bytes(&bytes("[copy] [drop] swap cat"), &config).unwrap();
    assert_eq!(outcome.block.to_string(), "[drop copy]");
    assert!(outcome.is_complete());
    assert_eq!(encode(&outcome.block).unwrap(), bytes("[drop copy]"));
}

#[test]
fn test_malformed_bytecode_is_an_error() {
    let config = ReduceConfig::default();
    assert!(reduce_bytes(&[0x00, 0x04], &config).is_err());
    assert!(reduce_bytes(&[0x0E], &config).is_err());
    assert!(reduce_bytes(&[0x42], &config).is_err());
}

#[test]
fn test_exhausted_result_through_bytecode() {
    let omega = parse("[copy app] copy app").unwrap();
    let config = ReduceConfig {
        quota: 3,
        trace: false,
    };
    let outcome = reduce_bytes(&encode(&omega).unwrap(), &config).unwrap();
    assert!(outcome.stats.exhausted);
    let wire = encode(&outcome.block).unwrap();
    assert_eq!(wire, bytes("app [copy app] [copy app]"));
    assert_eq!(decode_bytes(&wire).unwrap(), reduce(omega, 3));

    // the pending `app` now runs first and finds an empty stack
    let again = reduce_bytes(&wire, &config).unwrap();
    assert!(!again.stats.exhausted);
    assert_eq!(again.stats.stuck, 1);
    assert_eq!(again.block, outcome.block);
}

#[test]
fn test_links_are_opaque_values() {
    let target = parse("[copy] app").unwrap();
    let link = link_of(&target).unwrap();
    let program = abc::compose([link.clone(), parse("copy swap drop").unwrap()]);
    assert_eq!(reduce(program, 10), link);
}

#[test]
fn test_substructural_values_survive() {
    let config = ReduceConfig::default();
    let outcome = reduce_bytes(&bytes("[1 nodrop] drop [2 nocopy] copy"), &config).unwrap();
    assert_eq!(
        outcome.block.to_string(),
        "[1 nodrop] drop [2 nocopy] copy"
    );
    assert_eq!(outcome.stats.stuck, 2);
}

#[test]
fn test_batch_of_wire_programs() {
    let programs: Vec<Block> = ["1 2 swap", "[1] box", "app", "[1] [2] eq"]
        .iter()
        .map(|text| decode_bytes(&bytes(text)).unwrap())
        .collect();
    let results: Vec<String> = reduce_batch(&programs, 100)
        .iter()
        .map(|block| block.to_string())
        .collect();
    assert_eq!(results, vec!["2 1", "[[1]]", "app", "[1] [2] eq"]);
}

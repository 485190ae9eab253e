//! Folding compression output into the running state.

#![forbid(unsafe_code)]

use crate::block::Block;
use crate::compress::compress;
use crate::consts::State;
use crate::schedule::expand;

/// Add compressed chunk to current state.
pub fn accumulate(state: &mut State, registers: &State) {
    for (word, register) in state.iter_mut().zip(registers) {
        *word = word.wrapping_add(*register);
    }
}

/// Schedule, compress and accumulate one block.
pub fn process_block(state: &mut State, block: &Block) {
    let w = expand(block);
    let registers = compress(state, &w);
    accumulate(state, &registers);
}

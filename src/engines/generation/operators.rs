use crate::engines::generation::gene::{Gene, GeneValue};
use rand::Rng;

/// Uniform integer in `0..=max_possible`
pub fn rand_max<R: Rng>(max_possible: usize, rng: &mut R) -> usize {
    rng.gen_range(0..=max_possible)
}

/// Uniform field value in `min..=max`
pub fn random_value<V: GeneValue, R: Rng>(min: u64, max: u64, rng: &mut R) -> V {
    V::from_u64(rng.gen_range(min..=max))
}

/// Field index holding the given byte offset, i.e. the offset rounded down to
/// a field boundary.
pub fn field_boundary<V: GeneValue>(byte_offset: usize) -> usize {
    byte_offset / V::WIDTH
}

/// Fill every field of a gene with fresh random values
pub fn randomize_gene<V: GeneValue, R: Rng>(gene: &mut Gene<V>, min: u64, max: u64, rng: &mut R) {
    for value in gene.fields_mut() {
        *value = random_value(min, max, rng);
    }
}

/// Random split field for a gene of `gene_bytes` bytes: a byte offset in
/// `0..gene_bytes` quantized down to a field boundary.
pub fn random_split<V: GeneValue, R: Rng>(gene_bytes: usize, rng: &mut R) -> usize {
    field_boundary::<V>(rand_max(gene_bytes - 1, rng))
}

/// Two distinct positions in the first `remaining` entries of the parent list.
/// A collision shifts the first pick up by one, or down when it is already
/// the last remaining entry.
pub fn pick_parents<R: Rng>(remaining: usize, rng: &mut R) -> (usize, usize) {
    let mut first = rand_max(remaining - 1, rng);
    let second = rand_max(remaining - 2, rng);
    if first == second {
        if first < remaining - 1 {
            first += 1;
        } else {
            first -= 1;
        }
    }
    (first, second)
}

/// Drop two consumed entries from the live prefix `list[..remaining]` by
/// moving the last two live entries into their slots. Order is not kept.
pub fn remove_consumed(list: &mut [usize], remaining: usize, first: usize, second: usize) {
    list[first] = list[remaining - 1];
    list[second] = list[remaining - 2];
}

/// Write `prefix[..split]` followed by `suffix[split..]` into `child`.
pub fn splice<V: GeneValue>(prefix: &[V], suffix: &[V], split: usize, child: &mut [V]) {
    child[..split].copy_from_slice(&prefix[..split]);
    child[split..].copy_from_slice(&suffix[split..]);
}

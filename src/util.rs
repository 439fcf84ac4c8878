/// Binomial coefficient, zero when `k > n` and `usize::MAX` when it does not fit.
pub fn n_choose_k(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        match acc.checked_mul((n - i) as u128) {
            Some(product) => acc = product / (i as u128 + 1),
            None => return usize::MAX,
        }
    }
    usize::try_from(acc).unwrap_or(usize::MAX)
}

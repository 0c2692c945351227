/// Structural check of a block merkle proof before it is handed out.
///
/// A proof of height `h` is `h` concatenated 32 byte siblings and can only
/// prove leaf positions below `2^h`.
pub fn verify_proof(index: u64, proof: &[u8]) -> bool {
    if proof.len() % 32 != 0 {
        return false;
    }
    let height = proof.len() / 32;
    match u32::try_from(height).ok().and_then(|h| 1u64.checked_shl(h)) {
        Some(leaves) => index < leaves,
        // 64 or more levels cover every u64 index
        None => true,
    }
}

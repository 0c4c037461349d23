/// Standard COBS encoder used to build test fixtures for [`opv_cobs::CobsDeframer`].
///
/// Mirrors the run-length rules the deframer decodes: runs of up to 254
/// zero-free bytes, each preceded by a code byte, with `0xFF` marking a full
/// 254-byte run that chains into the next one with no implicit zero.
pub fn encode_packet(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 254 + 2);
    let mut code_index = 0;
    out.push(0); // placeholder for the first run's code byte
    let mut run_len: u8 = 0;

    for &b in payload {
        if run_len == 254 {
            out[code_index] = 0xFF;
            code_index = out.len();
            out.push(0);
            run_len = 0;
        }
        if b == 0 {
            out[code_index] = run_len + 1;
            code_index = out.len();
            out.push(0);
            run_len = 0;
        } else {
            out.push(b);
            run_len += 1;
        }
    }
    out[code_index] = run_len + 1;
    out.push(0);
    out
}

/// Splits `bytes` into `chunk_len`-sized pieces (last one possibly short),
/// for exercising frame-boundary independence.
pub fn chunks(bytes: &[u8], chunk_len: usize) -> Vec<&[u8]> {
    bytes.chunks(chunk_len).collect()
}

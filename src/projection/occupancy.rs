//! Occupancy ramp-up vector
//!
//! Occupancy climbs linearly from the year-1 rate to the year-5 rate, then
//! holds flat for whatever remains of the horizon. A horizon shorter than
//! five years interpolates across all of its points instead.

/// Build the per-year occupancy sequence, one fraction per projected year.
pub fn occupancy_vector(start: f64, end: f64, num_years: u32) -> Vec<f64> {
    let n = num_years as usize;
    if n == 0 {
        return Vec::new();
    }
    let ramp_len = n.min(5);
    let mut occ = Vec::with_capacity(n);
    if ramp_len == 1 {
        occ.push(start);
    } else {
        let step = (end - start) / (ramp_len - 1) as f64;
        for i in 0..ramp_len {
            occ.push(start + step * i as f64);
        }
    }
    // Plateau at the year-5 rate for the rest of the horizon
    occ.resize(n, end);
    occ
}

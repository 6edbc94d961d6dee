use super::model::Spectrum;

/// Fixed-length view over a flat sample stream.
///
/// Frame `i` is `samples[i * frame_length..(i + 1) * frame_length]`. A partial
/// trailing frame is never produced.
#[derive(Debug, Clone, Copy)]
pub struct Segmented<'a> {
    samples: &'a [f64],
    frame_length: usize,
}

impl<'a> Segmented<'a> {
    pub fn new(samples: &'a [f64], frame_length: usize) -> Self {
        Segmented {
            samples,
            frame_length,
        }
    }

    /// `floor(N / L)`; zero for an empty frame length.
    pub fn frame_count(&self) -> usize {
        let len = self.samples.len();
        len.checked_div(self.frame_length).unwrap_or(0)
    }

    /// Borrow the `index`-th frame.
    pub fn frame(&self, index: usize) -> Option<&'a [f64]> {
        if index >= self.frame_count() {
            return None;
        }
        let start = index * self.frame_length;
        let samples: &'a [f64] = self.samples;
        Some(&samples[start..start + self.frame_length])
    }

    /// Copy the `index`-th frame out as a [`Spectrum`].
    pub fn spectrum(&self, index: usize) -> Option<Spectrum> {
        self.frame(index).map(Spectrum::from_slice)
    }
}

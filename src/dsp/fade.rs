/*
Pulse Fade Envelope
===================

A 1ms tone burst switched on and off at full amplitude produces an audible
click at each edge: the waveform jumps, and a jump carries energy across the
whole spectrum. The fix is a short linear ramp at both ends of the burst.

The Shape: Trapezoid
--------------------

  Gain
    1.0 ┤     ┌─────────────────┐
        │    ╱                   ╲
        │   ╱                     ╲
    0.0 └──╱───────────────────────╲──→ Sample
        0  fade            len-fade  len

  fade = len / 4   (integer division)

  rising edge   pos <  fade         gain = pos / fade
  plateau       fade <= pos <= len - fade   gain = 1
  falling edge  pos >  len - fade   gain = (len - pos) / fade

With the stock geometry (44 samples per tone) the ramp is 11 samples long,
so pos = 10 sits at 10/11 of full level and pos = 0 is exactly silent.

The Degenerate Case
-------------------

When the burst is shorter than four samples, `len / 4` is zero and there is
no room for a ramp. The gain is then 1 across the whole burst and no division
takes place. Past the end of the burst the gain is 0.
*/

/// Linear fade-in/fade-out gain for a burst of `len` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearFade {
    len: u32,
    fade: u32,
}

impl LinearFade {
    /// Quarter-length ramps on each side of a `len`-sample burst.
    pub const fn quarter(len: u32) -> Self {
        Self { len, fade: len / 4 }
    }

    /// Ramp length in samples (0 disables fading).
    pub const fn fade_len(&self) -> u32 {
        self.fade
    }

    /// Burst length in samples.
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Gain to apply at `pos` samples into the burst.
    ///
    /// Positions at or past the end of the burst are silent.
    #[inline]
    pub fn gain(&self, pos: u32) -> f64 {
        if pos >= self.len {
            return 0.0;
        }
        if self.fade == 0 {
            return 1.0;
        }

        if pos < self.fade {
            pos as f64 / self.fade as f64
        } else if pos > self.len - self.fade {
            (self.len - pos) as f64 / self.fade as f64
        } else {
            1.0
        }
    }
}

use crate::captions::Caption;

/// Currently displayed caption plus its single expiry deadline.
///
/// Every `show` overwrites the deadline, so a burst of interactions keeps the
/// caption up until `timeout_sec` after the last one. `revision` bumps on every
/// visible change so the display layer can sync lazily.
#[derive(Clone, Debug)]
pub struct CaptionBoard {
    current: Option<Caption>,
    expires_at: Option<f64>,
    timeout_sec: f64,
    revision: u64,
}

impl CaptionBoard {
    pub fn new(timeout_sec: f64) -> Self {
        Self {
            current: None,
            expires_at: None,
            timeout_sec,
            revision: 0,
        }
    }

    pub fn current(&self) -> Option<&Caption> {
        self.current.as_ref()
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn show(&mut self, caption: Caption, now: f64) {
        if self.current != Some(caption) {
            self.revision += 1;
        }
        self.current = Some(caption);
        self.expires_at = Some(now + self.timeout_sec);
    }

    pub fn dismiss(&mut self) {
        if self.current.take().is_some() {
            self.revision += 1;
        }
        self.expires_at = None;
    }

    /// Clears the caption once its deadline has passed. Returns true if it did.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }
}

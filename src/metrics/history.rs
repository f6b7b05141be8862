/// A fixed-capacity circular buffer of sampled values feeding the rolling
/// plots.
///
/// The buffer starts empty; the first `push` allocates its slots and the
/// capacity is fixed for the rest of its lifetime. The running max/min
/// cover every value ever written, not just the current window, so plot
/// scales never jump back down when an old peak rotates out.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    values: Vec<f32>,
    capacity: usize,
    cursor: usize,
    len: usize,
    max_value: f32,
    min_value: f32,
}

pub const DEFAULT_HISTORY_CAPACITY: usize = 90;

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            capacity: capacity.max(1),
            cursor: 0,
            len: 0,
            max_value: 0.0,
            min_value: 0.0,
        }
    }

    /// Writes one sample at the cursor and advances it modulo capacity.
    pub fn push(&mut self, value: f32) {
        if self.values.is_empty() {
            self.values = vec![0.0; self.capacity];
            self.max_value = value;
            self.min_value = value;
        }
        self.values[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.values.len();
        self.len = (self.len + 1).min(self.values.len());
        self.max_value = self.max_value.max(value);
        self.min_value = self.min_value.min(value);
    }

    /// The last value written, or `None` before the first push.
    pub fn latest(&self) -> Option<f32> {
        if self.len == 0 {
            return None;
        }
        let i = (self.cursor + self.values.len() - 1) % self.values.len();
        Some(self.values[i])
    }

    /// All-time maximum across every value ever written.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// All-time minimum across every value ever written.
    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let head = if self.len < self.values.len() {
            0
        } else {
            self.cursor
        };
        self.values[head..]
            .iter()
            .chain(&self.values[..head])
            .copied()
            .take(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_first_push() {
        let buf = HistoryBuffer::new(4);
        assert!(buf.is_empty());
        assert_eq!(buf.latest(), None);
        assert_eq!(buf.iter().count(), 0);
    }

    #[test]
    fn first_push_seeds_extrema() {
        let mut buf = HistoryBuffer::new(4);
        buf.push(42.0);
        assert_eq!(buf.latest(), Some(42.0));
        assert_eq!(buf.max_value(), 42.0);
        assert_eq!(buf.min_value(), 42.0);
    }

    #[test]
    fn filling_exactly_to_capacity_keeps_last_value() {
        for capacity in 1..6 {
            let mut buf = HistoryBuffer::new(capacity);
            for i in 0..capacity {
                buf.push(i as f32);
            }
            assert_eq!(buf.latest(), Some((capacity - 1) as f32));
            assert_eq!(buf.len(), capacity);
        }
    }

    #[test]
    fn wraparound_keeps_last_capacity_values_in_order() {
        let mut buf = HistoryBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buf.push(v);
        }
        assert_eq!(buf.iter().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_eq!(buf.latest(), Some(5.0));
    }

    #[test]
    fn extrema_are_all_time_not_windowed() {
        let mut buf = HistoryBuffer::new(2);
        buf.push(100.0);
        buf.push(-5.0);
        buf.push(1.0);
        buf.push(2.0);
        // 100.0 and -5.0 have rotated out of the window but still bound it.
        assert_eq!(buf.max_value(), 100.0);
        assert_eq!(buf.min_value(), -5.0);
        assert_eq!(buf.iter().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn default_capacity_is_ninety() {
        let mut buf = HistoryBuffer::default();
        assert_eq!(buf.capacity(), DEFAULT_HISTORY_CAPACITY);
        for i in 0..200 {
            buf.push(i as f32);
        }
        assert_eq!(buf.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(buf.latest(), Some(199.0));
    }
}

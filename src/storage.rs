//! Fixed-capacity node storage with an intrusive unique table.
//!
//! Every slot holds a value, an occupancy flag and the index of the next slot in
//! its bucket chain. Bucket heads live in a separate power-of-two array; chains are
//! threaded through the slots themselves, so no extra allocation happens on insert.
//! Index `0` is a sentinel meaning "no slot" and is never handed out.

use std::cmp::min;
use std::ops::Index;

use crate::error::CapacityError;
use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    next: usize,
    occupied: bool,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            next: 0,
            occupied: false,
        }
    }
}

impl<T> Default for Entry<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

pub struct Storage<T> {
    data: Vec<Entry<T>>,

    buckets: Vec<usize>,
    bitmask: u64,

    /// Index of the first *possibly* free (non-occupied) cell.
    min_free: usize,
    /// Index of the last allocated cell.
    last_index: usize,
    /// Number of occupied cells.
    real_size: usize,
}

impl<T> Storage<T>
where
    T: Default,
{
    /// Create a new storage with `2^bits` slots and `2^buckets_bits` buckets.
    pub fn new(bits: usize, buckets_bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");
        assert!(
            buckets_bits <= 31,
            "Buckets bits should be in the range 0..=31"
        );

        let capacity = 1 << bits;
        let mut data: Vec<Entry<T>> = Vec::with_capacity(capacity);
        data.resize_with(capacity, Entry::default);
        data[0].occupied = true; // sentinel

        let buckets_size = 1 << buckets_bits;
        let buckets = vec![0; buckets_size];
        let bitmask = (buckets_size - 1) as u64;

        Self {
            data,
            buckets,
            bitmask,
            min_free: 1,
            last_index: 0,
            real_size: 0,
        }
    }
}

impl<T> Storage<T> {
    /// Get the total number of slots, including the sentinel.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
    /// Get the index of the last allocated slot.
    pub fn size(&self) -> usize {
        self.last_index
    }
    /// Get the number of occupied slots.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index].value
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        assert_ne!(index, 0, "Index is 0");
        self.data[index].occupied
    }

    pub fn next(&self, index: usize) -> usize {
        assert_ne!(index, 0, "Index is 0");
        self.data[index].next
    }
    pub fn set_next(&mut self, index: usize, next: usize) {
        assert_ne!(index, 0, "Index is 0");
        self.data[index].next = next;
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
    pub fn bucket(&self, bucket_index: usize) -> usize {
        self.buckets[bucket_index]
    }
    pub fn set_bucket(&mut self, bucket_index: usize, index: usize) {
        self.buckets[bucket_index] = index;
    }

    /// Allocate a free slot and return its index.
    ///
    /// Slots released by [`Storage::drop`] are reused, lowest index first.
    pub(crate) fn try_alloc(&mut self) -> Result<usize, CapacityError> {
        let index = (self.min_free..=self.last_index)
            .find(|&i| !self.data[i].occupied)
            .unwrap_or(self.last_index + 1);

        if index >= self.capacity() {
            return Err(CapacityError::StorageFull {
                capacity: self.capacity(),
            });
        }

        self.last_index = self.last_index.max(index);
        self.data[index].occupied = true;
        self.min_free = index + 1;
        self.real_size += 1;

        Ok(index)
    }

    /// Release the slot at the given index.
    ///
    /// The caller is responsible for unlinking it from its bucket chain.
    pub fn drop(&mut self, index: usize) {
        assert_ne!(index, 0, "Index is 0");
        assert!(self.data[index].occupied, "Index {} is not occupied", index);

        self.data[index].occupied = false;
        self.data[index].next = 0;
        self.min_free = min(self.min_free, index);
        self.real_size -= 1;
    }

    /// Add a new value and return its index. The slot is not linked into any bucket.
    pub fn try_add(&mut self, value: T) -> Result<usize, CapacityError> {
        let index = self.try_alloc()?;

        self.data[index].value = value;
        self.data[index].next = 0;

        Ok(index)
    }

    /// Lengths of all bucket chains.
    pub fn chains(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(move |&head| {
            let mut count = 0;
            let mut index = head;
            while index != 0 {
                count += 1;
                index = self.data[index].next;
            }
            count
        })
    }
}

impl<T> Storage<T>
where
    T: MyHash + Eq,
{
    pub fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Return the index of an equal value already stored, or store a new one.
    pub fn try_put(&mut self, value: T) -> Result<usize, CapacityError> {
        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        if index == 0 {
            // Empty bucket: the new slot becomes its head.
            let i = self.try_add(value)?;
            self.buckets[bucket_index] = i;
            return Ok(i);
        }

        loop {
            debug_assert!(self.data[index].occupied);

            if self.data[index].value == value {
                return Ok(index);
            }

            let next = self.data[index].next;
            if next == 0 {
                // Append to the chain tail.
                let i = self.try_add(value)?;
                self.data[index].next = i;
                return Ok(i);
            }
            index = next;
        }
    }
}

impl<T> Index<usize> for Storage<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

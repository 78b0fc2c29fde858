use digest::Digest;

/// Deterministic byte stream obtained by hashing the provided values salted
/// with an internal counter. The counter is prepended to conserve entropy.
///
/// Block `i` of the stream is `hash(D::new().chain_update(le64(i)))`, blocks
/// are emitted back to back.
pub struct HashRng<F, D: Digest> {
    hash: F,
    counter: u64,
    buffer: digest::Output<D>,
    offset: usize,
}

impl<F, D: Digest> HashRng<F, D> {
    /// Create the RNG from the hash finalization function. Use it like this:
    /// ```ignore
    /// HashRng::new(|d| d.chain_update("my_values").finalize())
    /// ```
    pub fn new(hash: F) -> Self
    where
        F: Fn(D) -> digest::Output<D>,
    {
        let d: D = D::new().chain_update(0u64.to_le_bytes());
        let buffer: digest::Output<D> = hash(d);
        HashRng {
            hash,
            counter: 1,
            offset: 0,
            buffer,
        }
    }
}

impl<F, D> rand_core::RngCore for HashRng<F, D>
where
    D: Digest,
    F: Fn(D) -> digest::Output<D>,
{
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, mut dest: &mut [u8]) {
        while !dest.is_empty() {
            if self.offset == self.buffer.len() {
                self.buffer = (self.hash)(D::new().chain_update(self.counter.to_le_bytes()));
                self.counter += 1;
                self.offset = 0;
            }
            let n = dest.len().min(self.buffer.len() - self.offset);
            dest[..n].copy_from_slice(&self.buffer[self.offset..self.offset + n]);
            self.offset += n;
            dest = &mut core::mem::take(&mut dest)[n..];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

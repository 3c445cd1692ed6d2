use log::trace;

use crate::defs::{PlaneKey, Visplane, VisplaneId};

/// Hash bucketed store of this frame's visplanes.
///
/// Visplanes live in an arena and are linked through their bucket chains.
/// Nothing is freed during a frame: `reset_frame` moves every live entry to
/// the free list, and the next frame reuses them along with their column
/// arrays.
pub struct VisplanePool {
    planes: Vec<Visplane>,
    buckets: Vec<Option<VisplaneId>>,
    free: Vec<VisplaneId>,
    /// Live ids in allocation order
    live: Vec<VisplaneId>,
    screen_width: usize,
    screen_height: usize,
}

impl VisplanePool {
    /// `buckets` must be a power of two
    pub fn new(buckets: usize, screen_width: usize, screen_height: usize) -> Self {
        debug_assert!(buckets.is_power_of_two());
        Self {
            planes: Vec::new(),
            buckets: vec![None; buckets],
            free: Vec::new(),
            live: Vec::new(),
            screen_width,
            screen_height,
        }
    }

    /// R_ClearPlanes, the visplane half. Calling it again without any new
    /// requests in between leaves the pool just as empty.
    pub fn reset_frame(&mut self) {
        self.free.append(&mut self.live);
        self.buckets.fill(None);
    }

    /// Number of live visplanes
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Visplanes allocated over the pool's lifetime, live or free
    pub fn capacity(&self) -> usize {
        self.planes.len()
    }

    pub fn get(&self, id: VisplaneId) -> &Visplane {
        &self.planes[id]
    }

    pub fn get_mut(&mut self, id: VisplaneId) -> &mut Visplane {
        &mut self.planes[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Visplane> {
        self.live.iter().map(|&id| &self.planes[id])
    }

    /// Find a visplane drawn exactly like `key`, or start a new one with no
    /// columns.
    ///
    /// Skies ignore their light level, so every sky column lands in the same
    /// visplane.
    pub fn find(&mut self, mut key: PlaneKey, sky_flat: usize) -> VisplaneId {
        if key.is_sky(sky_flat) {
            key.lightlevel = 0;
        }

        let bucket = key.hash(self.buckets.len());
        let mut check = self.buckets[bucket];
        while let Some(id) = check {
            let pl = &self.planes[id];
            if pl.key == key {
                return id;
            }
            check = pl.next;
        }

        self.alloc(key, bucket)
    }

    /// Claim columns `start..=stop` for the visplane `id`.
    ///
    /// If none of the columns shared with its current range have been
    /// claimed yet the visplane simply widens. Otherwise a second visplane
    /// with the same key is started covering only the new range.
    pub fn check(&mut self, id: VisplaneId, start: i32, stop: i32) -> VisplaneId {
        let pl = &mut self.planes[id];

        let (intrl, unionl) = if start < pl.minx {
            (pl.minx, start)
        } else {
            (start, pl.minx)
        };

        let (intrh, unionh) = if stop > pl.maxx {
            (pl.maxx, stop)
        } else {
            (stop, pl.maxx)
        };

        if (intrl..=intrh).all(|x| pl.is_untouched(x)) {
            pl.minx = unionl;
            pl.maxx = unionh;
            return id;
        }

        let key = pl.key;
        let bucket = key.hash(self.buckets.len());
        let new_id = self.alloc(key, bucket);
        let pl = &mut self.planes[new_id];
        pl.minx = start;
        pl.maxx = stop;
        trace!("visplane {id} split for columns {start}..={stop} as {new_id}");
        new_id
    }

    /// Take a visplane from the free list, or grow the arena, and push it on
    /// the front of `bucket`
    fn alloc(&mut self, key: PlaneKey, bucket: usize) -> VisplaneId {
        let id = match self.free.pop() {
            Some(id) => {
                self.planes[id].reset(key);
                id
            }
            None => {
                self.planes
                    .push(Visplane::new(key, self.screen_width, self.screen_height));
                self.planes.len() - 1
            }
        };
        self.planes[id].next = self.buckets[bucket];
        self.buckets[bucket] = Some(id);
        self.live.push(id);
        id
    }
}

/// R_MakeSpans
///
/// Walks the visplane's columns left to right and calls `map(y, x1, x2)` once
/// for every maximal horizontal run of open pixels. `spanstart` holds, per
/// row, the column the currently open run began at and must be as long as
/// the surface is high. Columns outside `minx..=maxx` count as closed.
pub fn make_spans(pl: &Visplane, spanstart: &mut [i32], mut map: impl FnMut(i32, i32, i32)) {
    let closed = |x: i32| -> (i32, i32) {
        if x < pl.minx || x > pl.maxx {
            (pl.closed, 0)
        } else {
            (pl.top[x as usize], pl.bottom[x as usize])
        }
    };

    for x in pl.minx..=pl.maxx + 1 {
        let (mut t1, mut b1) = closed(x - 1);
        let (mut t2, mut b2) = closed(x);

        // Rows closing at this column end their run at x - 1
        while t1 < t2 && t1 <= b1 {
            map(t1, spanstart[t1 as usize], x - 1);
            t1 += 1;
        }
        while b1 > b2 && b1 >= t1 {
            map(b1, spanstart[b1 as usize], x - 1);
            b1 -= 1;
        }

        // Rows opening at this column start a run here
        while t2 < t1 && t2 <= b2 {
            spanstart[t2 as usize] = x;
            t2 += 1;
        }
        while b2 > b1 && b2 >= t2 {
            spanstart[b2 as usize] = x;
            b2 -= 1;
        }
    }
}

//! Deterministic in-place stable sort.
//!
//! Insertion-sorted runs of [`BLOCK_SIZE`] elements are merged pairwise with
//! the SymMerge algorithm (Kim & Kutzner, 2004). The sequence of comparisons
//! and swaps depends only on the input and the relation, so every node
//! produces the same order even when the relation is not transitive.
//! `slice::sort_by` gives no such guarantee and may panic on a relation that
//! is not a total order.

/// Length of the runs sorted by insertion before merging.
pub const BLOCK_SIZE: usize = 20;

/// Sort `data` so that no element is preceded by one it is `less` than.
///
/// Elements that are not `less` than each other keep their input order.
pub fn stable_sort_by<T, F>(data: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let n = data.len();
    let mut block_size = BLOCK_SIZE;

    let (mut a, mut b) = (0, block_size);
    while b <= n {
        insertion_sort(data, a, b, &mut less);
        a = b;
        b += block_size;
    }
    insertion_sort(data, a, n, &mut less);

    while block_size < n {
        a = 0;
        b = 2 * block_size;
        while b <= n {
            sym_merge(data, a, a + block_size, b, &mut less);
            a = b;
            b += 2 * block_size;
        }
        let m = a + block_size;
        if m < n {
            sym_merge(data, a, m, n, &mut less);
        }
        block_size *= 2;
    }
}

fn insertion_sort<T, F>(data: &mut [T], a: usize, b: usize, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in a + 1..b {
        let mut j = i;
        while j > a && less(&data[j], &data[j - 1]) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

// Merges the sorted runs data[a..m] and data[m..b].
fn sym_merge<T, F>(data: &mut [T], a: usize, m: usize, b: usize, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Single element on the left: binary search its slot on the right.
    if m - a == 1 {
        let (mut i, mut j) = (m, b);
        while i < j {
            let h = (i + j) / 2;
            if less(&data[h], &data[a]) {
                i = h + 1;
            } else {
                j = h;
            }
        }
        for k in a..i - 1 {
            data.swap(k, k + 1);
        }
        return;
    }

    // Single element on the right: binary search its slot on the left.
    if b - m == 1 {
        let (mut i, mut j) = (a, m);
        while i < j {
            let h = (i + j) / 2;
            if !less(&data[m], &data[h]) {
                i = h + 1;
            } else {
                j = h;
            }
        }
        let mut k = m;
        while k > i {
            data.swap(k, k - 1);
            k -= 1;
        }
        return;
    }

    let mid = (a + b) / 2;
    let n = mid + m;
    let (mut start, mut r) = if m > mid { (n - b, mid) } else { (a, m) };
    let p = n - 1;

    while start < r {
        let c = (start + r) / 2;
        if !less(&data[p - c], &data[c]) {
            start = c + 1;
        } else {
            r = c;
        }
    }

    let end = n - start;
    if start < m && m < end {
        data[start..end].rotate_left(m - start);
    }
    if a < start && start < mid {
        sym_merge(data, a, start, mid, less);
    }
    if mid < end && end < b {
        sym_merge(data, mid, end, b, less);
    }
}

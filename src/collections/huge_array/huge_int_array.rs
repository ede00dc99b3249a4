//! `HugeIntArray` - an `i32` array that can hold more than 2 billion
//! elements.
//!
//! Generated by [`crate::huge_primitive_array_base`],
//! [`crate::huge_numeric_ops`], and [`crate::huge_integer_ops`].

crate::huge_primitive_array_base!(
    HugeIntArray,
    SingleHugeIntArray,
    PagedHugeIntArray,
    HugeIntArrayCursor,
    i32,
    "A long-indexable `i32` array that can hold more than 2 billion elements."
);

crate::huge_numeric_ops!(HugeIntArray, i32, wrapping);
crate::huge_integer_ops!(HugeIntArray, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let array = HugeIntArray::new(100);
        assert_eq!(array.size(), 100);
        assert_eq!(array.get(0), 0);
    }

    #[test]
    fn get_set_round_trip() {
        let mut array = HugeIntArray::new(10);
        array.set(5, 42);
        assert_eq!(array.get(5), 42);
        assert_eq!(array.get(0), 0);
    }

    #[test]
    fn fill_sets_every_element() {
        let mut array = HugeIntArray::new(100);
        array.fill(99);
        assert_eq!(array.get(0), 99);
        assert_eq!(array.get(50), 99);
        assert_eq!(array.get(99), 99);
    }

    #[test]
    fn set_all_applies_generator() {
        let mut array = HugeIntArray::new(10);
        array.set_all(|i| (i * 2) as i32);
        assert_eq!(array.get(0), 0);
        assert_eq!(array.get(1), 2);
        assert_eq!(array.get(5), 10);
    }

    #[test]
    fn from_vec_preserves_order() {
        let array = HugeIntArray::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(array.size(), 5);
        assert_eq!(array.get(0), 1);
        assert_eq!(array.get(4), 5);
    }

    #[test]
    fn copy_of_extends_with_default() {
        let mut array = HugeIntArray::new(5);
        array.set_all(|i| i as i32);

        let copy = array.copy_of(10);
        assert_eq!(copy.size(), 10);
        assert_eq!(copy.get(0), 0);
        assert_eq!(copy.get(4), 4);
        assert_eq!(copy.get(9), 0);
    }

    #[test]
    fn add_to_wraps_at_i32_boundary() {
        let mut array = HugeIntArray::new(1);
        array.set(0, i32::MAX);
        array.add_to(0, 1);
        assert_eq!(array.get(0), i32::MIN);
    }

    #[test]
    fn get_and_add_returns_prior_value() {
        let mut array = HugeIntArray::new(1);
        array.set(0, 10);
        let prior = array.get_and_add(0, 5);
        assert_eq!(prior, 10);
        assert_eq!(array.get(0), 15);
    }

    #[test]
    fn or_and_combine_bits() {
        let mut array = HugeIntArray::new(1);
        array.set(0, 0xF0);
        array.or(0, 0x0F);
        assert_eq!(array.get(0), 0xFF);
        array.and(0, 0x0F);
        assert_eq!(array.get(0), 0x0F);
    }

    #[test]
    fn display_matches_bracketed_csv() {
        let array = HugeIntArray::from_vec(vec![-1, 0, 1]);
        assert_eq!(array.to_string(), "[-1, 0, 1]");
    }

    #[test]
    fn paged_representation_crosses_page_boundary() {
        use crate::collections::paging::PageConstants;
        let size = PageConstants::PAGE_SIZE * 2 + 5;
        let mut array = HugeIntArray::new(size);
        array.set_all(|i| i as i32);
        assert_eq!(array.get(PageConstants::PAGE_SIZE - 1) as usize, PageConstants::PAGE_SIZE - 1);
        assert_eq!(array.get(PageConstants::PAGE_SIZE) as usize, PageConstants::PAGE_SIZE);
        assert_eq!(array.get(size - 1) as usize, size - 1);
    }
}

use ndarray::{array, Array2, Array3};

use geodist_core::chamfer::ChamferPreset;
use geodist_core::distance::distance_transform;

fn centre_hole(n: usize) -> Array2<bool> {
    let mut image = Array2::from_elem((n, n), true);
    image[[n / 2, n / 2]] = false;
    image
}

#[test]
fn test_city_block_transform() {
    let map = distance_transform::<u8, _, _>(
        &centre_hole(5),
        &ChamferPreset::CityBlock.mask(),
        true,
    )
    .unwrap();
    let expected = array![
        [4u8, 3, 2, 3, 4],
        [3, 2, 1, 2, 3],
        [2, 1, 0, 1, 2],
        [3, 2, 1, 2, 3],
        [4, 3, 2, 3, 4],
    ];
    assert_eq!(map.data, expected);
}

#[test]
fn test_chessboard_transform() {
    let map = distance_transform::<u8, _, _>(
        &centre_hole(5),
        &ChamferPreset::Chessboard.mask(),
        true,
    )
    .unwrap();
    let expected = array![
        [2u8, 2, 2, 2, 2],
        [2, 1, 1, 1, 2],
        [2, 1, 0, 1, 2],
        [2, 1, 1, 1, 2],
        [2, 2, 2, 2, 2],
    ];
    assert_eq!(map.data, expected);
}

#[test]
fn test_background_is_zero() {
    let image = array![
        [false, true, true, true],
        [true, true, true, false],
        [true, true, true, true],
    ];
    let map = distance_transform::<f32, _, _>(&image, &ChamferPreset::Borgefors.mask(), false)
        .unwrap();
    assert_eq!(map.data[[0, 0]], 0.0);
    assert_eq!(map.data[[1, 3]], 0.0);
    assert_eq!(map.data[[0, 1]], 3.0);
    assert_eq!(map.data[[1, 1]], 4.0);
    assert_eq!(map.data[[2, 1]], 7.0);
    assert!(map.data.iter().all(|v| v.is_finite()));
}

#[test]
fn test_all_foreground_is_unreached() {
    let image = Array2::from_elem((3, 3), true);
    let map = distance_transform::<f64, _, _>(&image, &ChamferPreset::Borgefors.mask(), true)
        .unwrap();
    assert!(map.data.iter().all(|v| *v == f64::INFINITY));
    assert_eq!(map.stats().excluded, 0);
}

#[test]
fn test_volume_transform() {
    let mut image = Array3::from_elem((3, 3, 3), true);
    image[[1, 1, 1]] = false;
    let map = distance_transform::<u16, _, _>(&image, &ChamferPreset::Borgefors3D.mask(), false)
        .unwrap();
    assert_eq!(map.data[[1, 1, 1]], 0);
    assert_eq!(map.data[[1, 1, 0]], 3);
    assert_eq!(map.data[[1, 0, 0]], 4);
    assert_eq!(map.data[[0, 0, 0]], 5);
    assert_eq!(map.max_distance(), 5);
}

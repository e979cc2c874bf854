//! # Shopping Flow Integration Test
//!
//! Browse, add, review the cart, proceed to checkout.

use xolo_ui::{catalog, CursorFollower, InputEvent, InputState, ShellState};

/// Test: adding every product in the catalog.
#[test]
fn test_add_whole_catalog() {
    let mut shell = ShellState::new();

    for row in catalog() {
        for product in row.products {
            shell.add_to_cart(*product);
            shell.close_cart();
        }
    }

    assert_eq!(shell.badge_count(), 10);
    assert_eq!(shell.cart().subtotal(), "$199.90");
    // Same label in both rows, separate lines
    let drip = shell
        .cart()
        .items()
        .iter()
        .filter(|p| p.label == "DripNest")
        .count();
    assert_eq!(drip, 2);
}

/// Test: the full path from product card to checkout form.
#[test]
fn test_card_to_checkout() {
    let mut shell = ShellState::new();
    let product = catalog()[0].products[3];

    shell.add_to_cart(product);
    for _ in 0..60 {
        shell.update(1.0 / 60.0);
    }
    assert!(shell.is_cart_open());
    assert!(shell.cart_offset().abs() < f32::EPSILON);

    shell.show_checkout();
    for _ in 0..60 {
        shell.update(1.0 / 60.0);
    }
    assert!(!shell.is_cart_open());
    assert!((shell.cart_offset() - 1.0).abs() < f32::EPSILON);
    assert!(shell.is_checkout_visible());
    assert_eq!(shell.cart().items(), &[product]);
}

/// Test: cursor follows the last pointer event of each frame.
#[test]
fn test_cursor_tracks_frames() {
    let mut input = InputState::new();
    let mut cursor = CursorFollower::new();

    for frame in 0..5u8 {
        input.begin_frame();
        for step in 0..3u8 {
            let x = f32::from(frame * 10 + step);
            let event = InputEvent::PointerMove {
                x,
                y: 100.0,
                time: f64::from(frame) * 16.0,
            };
            input.apply(&event);
            cursor.on_move(input.pointer_x, input.pointer_y);
        }
    }

    assert_eq!(cursor.position(), (42.0, 100.0));
    assert_eq!(input.pointer_delta(), (10.0, 0.0));
}

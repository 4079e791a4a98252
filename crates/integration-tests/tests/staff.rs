//! Admin order and catalog management, and the delivery dashboard.

use axum::http::StatusCode;
use furnicraft_integration_tests::TestContext;

#[tokio::test]
async fn test_admin_orders_default_to_paid() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let page = ctx.get("/admin/orders").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("ORD-002"));
    assert!(!page.body.contains("ORD-003"));

    let page = ctx.get("/admin/orders?status=all").await;
    assert!(page.body.contains("ORD-003"));
}

#[tokio::test]
async fn test_admin_updates_status() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx
        .post("/admin/orders/ORD-002/status", &[("status", "SHIPPED")])
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Order #ORD-002 status updated to SHIPPED")
    );
}

#[tokio::test]
async fn test_order_actions_return_to_same_tab() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx
        .post(
            "/admin/orders/ORD-001/status",
            &[("status", "SHIPPED"), ("filter", "READY_FOR_DELIVERY"), ("q", "ord-00")],
        )
        .await;
    assert!(response.redirects_to("/admin/orders?status=READY_FOR_DELIVERY&q=ord-00&success="));

    let response = ctx
        .post(
            "/admin/orders/ORD-002/assign",
            &[("delivery_person_id", "1"), ("filter", "ALL")],
        )
        .await;
    assert!(response.redirects_to("/admin/orders?status=ALL&success="));
}

#[tokio::test]
async fn test_assigned_order_reaches_courier() {
    let mut admin = TestContext::new();
    admin.login("admin@example.com").await;

    let response = admin
        .post(
            "/admin/orders/ORD-002/assign",
            &[("delivery_person_id", "2")],
        )
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Order #ORD-002 assigned to delivery personnel")
    );

    let mut priya = admin.stranger();
    priya.login("priya@example.com").await;
    let page = priya.get("/delivery").await;
    assert!(page.body.contains("ORD-002"));
}

#[tokio::test]
async fn test_register_delivery_person() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let fields = [
        ("name", "Arjun Mehta"),
        ("phone", "+91 9123456780"),
        ("email", "arjun@example.com"),
        ("password", "secret"),
    ];
    let response = ctx.post("/admin/delivery-people", &fields).await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery personnel registered successfully!")
    );

    let response = ctx.post("/admin/delivery-people", &fields).await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery personnel with this email or phone already exists.")
    );

    let mut arjun = ctx.stranger();
    arjun.login("arjun@example.com").await;
    assert_eq!(arjun.get("/delivery").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_delivery_person_with_taken_phone() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx
        .post(
            "/admin/delivery-people",
            &[
                ("name", "Raj Twin"),
                ("phone", "+91 98765 43210"),
                ("email", "raj.twin@example.com"),
                ("password", "secret"),
            ],
        )
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery personnel with this email or phone already exists.")
    );
}

#[tokio::test]
async fn test_register_delivery_person_with_missing_field() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx
        .post(
            "/admin/delivery-people",
            &[("name", "Arjun Mehta"), ("email", "arjun@example.com")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(
        response
            .decoded_location()
            .contains("Please fill all required fields")
    );
}

#[tokio::test]
async fn test_catalog_management() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx.post("/admin/categories", &[("name", "  ")]).await;
    assert!(
        response
            .decoded_location()
            .contains("Category name is required.")
    );

    let response = ctx.post("/admin/categories", &[("name", "Beds")]).await;
    assert!(
        response
            .decoded_location()
            .contains("Category added successfully.")
    );

    let response = ctx
        .post(
            "/admin/subcategories",
            &[("name", "King Bed"), ("category", "Beds")],
        )
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Subcategory added successfully.")
    );

    let response = ctx
        .post(
            "/admin/items",
            &[
                ("name", "Teak King Bed"),
                ("price", "45000"),
                ("description", "Solid teak frame"),
                ("subcategory", "King Bed"),
            ],
        )
        .await;
    assert!(response.decoded_location().contains("Item added successfully!"));

    let page = ctx
        .get("/categories?category=Beds&subcategory=King%20Bed")
        .await;
    assert!(page.body.contains("Teak King Bed"));
}

#[tokio::test]
async fn test_item_form_requires_fields() {
    let mut ctx = TestContext::new();
    ctx.login("admin@example.com").await;

    let response = ctx
        .post(
            "/admin/items",
            &[
                ("name", "Teak King Bed"),
                ("price", ""),
                ("description", "Solid teak frame"),
                ("subcategory", "3-Seater Sofa"),
            ],
        )
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Please fill in all required fields")
    );
}

#[tokio::test]
async fn test_delivery_confirmation() {
    let mut ctx = TestContext::new();
    ctx.login("raj@example.com").await;

    let page = ctx.get("/delivery").await;
    assert!(page.body.contains("ORD-001"));

    let response = ctx.post("/delivery/orders/ORD-001/otp", &[]).await;
    assert!(
        response
            .decoded_location()
            .contains("OTP has been sent to the customer.")
    );

    let response = ctx
        .post("/delivery/orders/ORD-001/confirm", &[("otp", "12ab")])
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Please enter a valid 6-digit OTP")
    );

    let response = ctx
        .post("/delivery/orders/ORD-001/confirm", &[("otp", "123456")])
        .await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery confirmed successfully!")
    );

    let response = ctx
        .post("/delivery/orders/ORD-001/confirm", &[("otp", "123456")])
        .await;
    assert!(
        response
            .decoded_location()
            .contains("This order has already been delivered or cancelled.")
    );

    let completed = ctx.get("/delivery?tab=completed").await;
    assert!(completed.body.contains("ORD-001"));
}

#[tokio::test]
async fn test_courier_cannot_touch_other_orders() {
    let mut ctx = TestContext::new();
    ctx.login("priya@example.com").await;

    let response = ctx.post("/delivery/orders/ORD-001/otp", &[]).await;
    assert!(response.decoded_location().contains("Order not found."));
}

#[tokio::test]
async fn test_availability_toggle() {
    let mut ctx = TestContext::new();
    ctx.login("raj@example.com").await;

    let response = ctx.post("/delivery/status", &[]).await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery status changed to INACTIVE")
    );
    let response = ctx.post("/delivery/status", &[]).await;
    assert!(
        response
            .decoded_location()
            .contains("Delivery status changed to ACTIVE")
    );
}

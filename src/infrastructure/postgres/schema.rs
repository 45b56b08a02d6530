diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        phone -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        customer_name -> Text,
        phone -> Text,
        address_json -> Jsonb,
        subtotal -> Float8,
        delivery_charge -> Float8,
        gst -> Float8,
        total_amount -> Float8,
        payment_mode -> Text,
        payment_status -> Text,
        order_status -> Text,
        order_type -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    order_items (id) {
        id -> Uuid,
        order_id -> Uuid,
        photo_name -> Text,
        photo_url -> Text,
        quantity -> Int4,
        price_per_unit -> Float8,
        order_type -> Text,
        polaroid_type -> Nullable<Text>,
        caption -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    payments (id) {
        id -> Uuid,
        order_id -> Uuid,
        razorpay_order_id -> Text,
        razorpay_payment_id -> Nullable<Text>,
        razorpay_signature -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    event_bookings (id) {
        id -> Uuid,
        event_type -> Text,
        event_date -> Timestamptz,
        time_slot -> Text,
        location -> Text,
        expected_guests -> Int4,
        contact_name -> Text,
        contact_phone -> Text,
        notes -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(payments -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    orders,
    order_items,
    payments,
    event_bookings,
);

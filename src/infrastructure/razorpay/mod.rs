pub mod razorpay_client;

mod mocks;
mod phone_service_tests;

mod twilio_verify_tests;

pub mod request_waiting_list;

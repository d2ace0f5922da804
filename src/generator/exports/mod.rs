pub mod trojan_go_link;

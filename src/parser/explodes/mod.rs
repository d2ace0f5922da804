pub mod trojan_go;

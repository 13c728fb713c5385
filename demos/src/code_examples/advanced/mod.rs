mod running_total;
mod squaring_all;
